//! Leave-one-out facet counts.
//!
//! The count next to a facet option answers "how many records would be
//! visible with every other active filter applied, ignoring only this
//! facet". Picking an option therefore never changes the counts shown for
//! its own facet.

use std::collections::BTreeMap;

use varlens_core::models::{ALL_LABEL, Facet, FilterState, Overrides, Selection, Variant};
use varlens_core::resolver::HgvsResolver;

use crate::engine::FilterEngine;

///
/// Counts for one facet: the size of the leave-one-out base set under
/// "All", and per-value counts within that base set.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetCounts {
    pub all: usize,
    pub values: BTreeMap<String, usize>,
}

impl FacetCounts {
    ///
    /// Count for an option label; `"All"` maps to the base-set size and
    /// unknown values to zero.
    ///
    pub fn get(&self, label: &str) -> usize {
        if label == ALL_LABEL {
            self.all
        } else {
            self.values.get(label).copied().unwrap_or(0)
        }
    }

    pub fn for_selection(&self, selection: &Selection) -> usize {
        match selection.value() {
            None => self.all,
            Some(value) => self.get(value),
        }
    }

    /// Per-value counts with the `"All"` pseudo-value folded in.
    pub fn to_map(&self) -> BTreeMap<String, usize> {
        let mut map = self.values.clone();
        map.insert(ALL_LABEL.to_string(), self.all);
        map
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllFacetCounts {
    pub variant_type: FacetCounts,
    pub patient: FacetCounts,
    pub quality: FacetCounts,
    pub consequence: FacetCounts,
}

impl AllFacetCounts {
    pub fn get(&self, facet: Facet) -> &FacetCounts {
        match facet {
            Facet::Type => &self.variant_type,
            Facet::Patient => &self.patient,
            Facet::Quality => &self.quality,
            Facet::Consequence => &self.consequence,
        }
    }
}

///
/// The facet values a single record contributes to. Patients fan out over
/// companions; records without a quality flag or consequence contribute
/// nothing to those facets.
///
fn contributed_values(variant: &Variant, facet: Facet) -> Vec<&str> {
    match facet {
        Facet::Type => vec![variant.variant_type.as_str()],
        Facet::Patient => variant.involved_patients(),
        Facet::Quality => variant.filter.as_deref().into_iter().collect(),
        Facet::Consequence => variant.consequence.as_deref().into_iter().collect(),
    }
}

pub struct FacetCounter<'e, R> {
    engine: &'e FilterEngine<R>,
}

impl<'e, R: HgvsResolver> FacetCounter<'e, R> {
    pub fn new(engine: &'e FilterEngine<R>) -> Self {
        FacetCounter { engine }
    }

    ///
    /// Counts for `facet`, computed with that facet forced to "All" and the
    /// other facets plus the search string at their live values.
    ///
    pub fn count(&self, records: &[Variant], state: &FilterState, facet: Facet) -> FacetCounts {
        let base = self
            .engine
            .apply(records, state, &Overrides::clearing(facet));

        let mut counts = FacetCounts {
            all: base.len(),
            values: BTreeMap::new(),
        };
        for variant in base {
            for value in contributed_values(variant, facet) {
                *counts.values.entry(value.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn count_all(&self, records: &[Variant], state: &FilterState) -> AllFacetCounts {
        AllFacetCounts {
            variant_type: self.count(records, state, Facet::Type),
            patient: self.count(records, state, Facet::Patient),
            quality: self.count(records, state, Facet::Quality),
            consequence: self.count(records, state, Facet::Consequence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use varlens_core::resolver::RawHgvs;

    #[fixture]
    fn records() -> Vec<Variant> {
        vec![
            Variant::new(100, "A", "G", "SNV", "P1")
                .with_filter("PASS")
                .with_consequence("missense_variant"),
            Variant::new(200, "AT", "A", "Indel", "P2")
                .with_filter("LOW")
                .with_consequence("frameshift_variant"),
            Variant::new(300, "C", "T", "SNV", "P3")
                .with_consequence("synonymous_variant")
                .with_companion(Variant::new(300, "C", "T", "SNV", "P1"))
                .with_companion(Variant::new(300, "C", "T", "SNV", "P2")),
            Variant::new(400, "G", "GA", "Indel", "P1")
                .with_filter("PASS")
                .with_consequence("frameshift_variant"),
        ]
    }

    #[rstest]
    fn test_patient_counts_fan_out_over_companions(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let counts = FacetCounter::new(&engine).count(&records, &FilterState::new(), Facet::Patient);

        assert_eq!(counts.all, 4);
        assert_eq!(counts.get("P1"), 3);
        assert_eq!(counts.get("P2"), 2);
        assert_eq!(counts.get("P3"), 1);
    }

    #[rstest]
    fn test_own_selection_is_ignored(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let counter = FacetCounter::new(&engine);

        let unfiltered = counter.count(&records, &FilterState::new(), Facet::Type);
        let mut state = FilterState::new();
        state.set(Facet::Type, "Indel".into());
        let selected = counter.count(&records, &state, Facet::Type);

        assert_eq!(unfiltered, selected);
        assert_eq!(selected.get("Indel"), 2);
        assert_eq!(selected.get("SNV"), 2);
    }

    #[rstest]
    fn test_other_facets_and_search_still_apply(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let counter = FacetCounter::new(&engine);

        let mut state = FilterState::new();
        state.set(Facet::Quality, "PASS".into());
        state.set(Facet::Type, "Indel".into());
        state.set_search("p1");

        // quality=PASS keeps 100, 300 (no flag), 400; search "p1" keeps all three
        let types = counter.count(&records, &state, Facet::Type);
        assert_eq!(types.to_map(), BTreeMap::from([
            ("All".to_string(), 3),
            ("Indel".to_string(), 1),
            ("SNV".to_string(), 2),
        ]));

        // type=Indel keeps 200 and 400, the search then drops 200
        let qualities = counter.count(&records, &state, Facet::Quality);
        assert_eq!(qualities.all, 1);
        assert_eq!(qualities.get("PASS"), 1);
        assert_eq!(qualities.get("LOW"), 0);
    }

    #[rstest]
    fn test_single_valued_counts_partition_base_set(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let counter = FacetCounter::new(&engine);

        let mut state = FilterState::new();
        state.set(Facet::Patient, "P1".into());
        state.set(Facet::Consequence, "frameshift_variant".into());

        for facet in [Facet::Type, Facet::Consequence] {
            let counts = counter.count(&records, &state, facet);
            let base = engine.apply(&records, &state, &Overrides::clearing(facet));
            assert_eq!(counts.values.values().sum::<usize>(), base.len());
            assert_eq!(counts.all, base.len());
        }
    }

    #[rstest]
    fn test_count_all_matches_individual_counts(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let counter = FacetCounter::new(&engine);
        let mut state = FilterState::new();
        state.set(Facet::Quality, "LOW".into());

        let all = counter.count_all(&records, &state);
        for facet in Facet::ALL {
            assert_eq!(all.get(facet), &counter.count(&records, &state, facet));
        }
        assert_eq!(all.get(Facet::Quality).for_selection(&state.quality), 1);
    }
}
