use varlens_core::models::Variant;
use varlens_core::resolver::HgvsResolver;

///
/// Free-text search over a fixed set of projections of a variant:
///
/// - `ref` + `position` + `alt` (e.g. `a100g`)
/// - the decimal position
/// - every involved patient, companions included
/// - every resolved HGVS name
///
/// Matching is a case-insensitive substring test against the trimmed query.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    query: Option<String>,
}

impl SearchPredicate {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        SearchPredicate {
            query: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }

    /// True when the query is blank and every record matches.
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
    }

    pub fn matches<R: HgvsResolver + ?Sized>(&self, variant: &Variant, resolver: &R) -> bool {
        let Some(query) = self.query.as_deref() else {
            return true;
        };

        if variant.allele_label().to_lowercase().contains(query) {
            return true;
        }
        if variant.position.to_string().contains(query) {
            return true;
        }
        if variant
            .involved_patients()
            .iter()
            .any(|p| p.to_lowercase().contains(query))
        {
            return true;
        }
        // resolving may consult the annotation cache, so it goes last
        resolver
            .resolve_hgvs(variant)
            .iter()
            .any(|name| name.to_lowercase().contains(query))
    }
}
