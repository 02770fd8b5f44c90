//! Minimal filter relaxation for externally selected records.
//!
//! When a linked view selects a record the live filters would hide, only
//! the dimensions that individually exclude it are reset. Everything else
//! stays as the user left it.

use std::fmt::{self, Display};

use log::info;
use varlens_core::models::{Facet, FilterState, Variant};
use varlens_core::resolver::HgvsResolver;

use crate::engine::{FilterEngine, passes_facet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Search,
    Facet(Facet),
}

impl Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Search => write!(f, "search"),
            Dimension::Facet(facet) => write!(f, "{}", facet),
        }
    }
}

/// Order in which dimensions are checked against the selected record.
pub const RECONCILE_ORDER: [Dimension; 5] = [
    Dimension::Search,
    Dimension::Facet(Facet::Type),
    Dimension::Facet(Facet::Patient),
    Dimension::Facet(Facet::Quality),
    Dimension::Facet(Facet::Consequence),
];

pub struct VisibilityReconciler<'e, R> {
    engine: &'e FilterEngine<R>,
}

impl<'e, R: HgvsResolver> VisibilityReconciler<'e, R> {
    pub fn new(engine: &'e FilterEngine<R>) -> Self {
        VisibilityReconciler { engine }
    }

    ///
    /// The dimensions that, each on its own, exclude `variant` under
    /// `state`. Every dimension is tested against the record itself, never
    /// against a partially filtered list.
    ///
    pub fn conflicts(&self, variant: &Variant, state: &FilterState) -> Vec<Dimension> {
        RECONCILE_ORDER
            .into_iter()
            .filter(|dimension| match dimension {
                Dimension::Search => !self.engine.passes_search(variant, &state.search),
                Dimension::Facet(facet) => !passes_facet(variant, *facet, state.selection(*facet)),
            })
            .collect()
    }

    ///
    /// Reset every conflicting dimension of `state` to its neutral value so
    /// `variant` becomes visible. Returns whether anything changed.
    ///
    pub fn ensure_visible(&self, variant: &Variant, state: &mut FilterState) -> bool {
        let conflicts = self.conflicts(variant, state);
        for dimension in &conflicts {
            match dimension {
                Dimension::Search => state.clear_search(),
                Dimension::Facet(facet) => state.clear(*facet),
            };
        }

        if !conflicts.is_empty() {
            let relaxed: Vec<String> = conflicts.iter().map(|d| d.to_string()).collect();
            info!("Relaxed filters [{}] to show {}", relaxed.join(", "), variant);
        }
        !conflicts.is_empty()
    }
}
