//! Faceted filtering over variant records.
//!
//! This crate provides the derived views of a variant collection:
//!
//! - [`SearchPredicate`]: free-text matching against a record's searchable projections
//! - [`FilterEngine`]: staged facet + search filtering with per-call overrides
//! - [`FacetCounter`]: leave-one-out counts for each facet
//! - [`VisibilityReconciler`]: minimal filter relaxation for a selected record
//!
//! Everything here is a pure function of the records, the [`FilterState`](varlens_core::models::FilterState)
//! and the HGVS resolver; nothing is cached between calls.
//!
//! # Example
//!
//! ```
//! use varlens_core::models::{Facet, FilterState, Overrides, Variant};
//! use varlens_core::resolver::RawHgvs;
//! use varlens_filter::{FacetCounter, FilterEngine};
//!
//! let records = vec![
//!     Variant::new(100, "A", "G", "SNV", "P1").with_filter("PASS"),
//!     Variant::new(200, "AT", "A", "Indel", "P2").with_filter("LOW"),
//! ];
//! let mut state = FilterState::new();
//! state.set(Facet::Quality, "PASS".into());
//!
//! let engine = FilterEngine::new(RawHgvs);
//! let visible = engine.apply(&records, &state, &Overrides::none());
//! assert_eq!(visible.len(), 1);
//!
//! let patients = FacetCounter::new(&engine).count(&records, &state, Facet::Patient);
//! assert_eq!(patients.get("P1"), 1);
//! ```

pub mod engine;
pub mod facets;
pub mod reconcile;
pub mod search;

// re-exports
pub use engine::FilterEngine;
pub use facets::{AllFacetCounts, FacetCounter, FacetCounts};
pub use reconcile::{Dimension, VisibilityReconciler};
pub use search::SearchPredicate;
