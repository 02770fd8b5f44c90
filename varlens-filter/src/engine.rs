//! Staged facet + search filtering.
//!
//! Stages run in a fixed order, each consuming the previous stage's output:
//! quality, type, patient, consequence, then free-text search. A stage whose
//! effective selection is "All" (or whose query is blank) is skipped.

use varlens_core::models::{Facet, FilterState, Overrides, Selection, Variant};
use varlens_core::resolver::{HgvsResolver, RawHgvs};

use crate::search::SearchPredicate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Quality,
    Type,
    Patient,
    Consequence,
    Search,
}

pub const STAGE_ORDER: [Stage; 5] = [
    Stage::Quality,
    Stage::Type,
    Stage::Patient,
    Stage::Consequence,
    Stage::Search,
];

///
/// Quality stage. A record without a quality flag passes every selection:
/// missing quality data is not the same as failing the filter.
///
pub fn passes_quality(variant: &Variant, selection: &Selection) -> bool {
    match selection.value() {
        None => true,
        Some(wanted) => variant.filter.as_deref().is_none_or(|flag| flag == wanted),
    }
}

/// Type stage: case-insensitive exact match.
pub fn passes_type(variant: &Variant, selection: &Selection) -> bool {
    match selection.value() {
        None => true,
        Some(wanted) => variant.variant_type.to_lowercase() == wanted.to_lowercase(),
    }
}

/// Patient stage: the owning patient or any companion's patient.
pub fn passes_patient(variant: &Variant, selection: &Selection) -> bool {
    match selection.value() {
        None => true,
        Some(wanted) => variant.involved_patients().contains(&wanted),
    }
}

/// Consequence stage: exact match, and a missing consequence never matches.
pub fn passes_consequence(variant: &Variant, selection: &Selection) -> bool {
    match selection.value() {
        None => true,
        Some(wanted) => variant.consequence.as_deref() == Some(wanted),
    }
}

pub fn passes_facet(variant: &Variant, facet: Facet, selection: &Selection) -> bool {
    match facet {
        Facet::Type => passes_type(variant, selection),
        Facet::Patient => passes_patient(variant, selection),
        Facet::Quality => passes_quality(variant, selection),
        Facet::Consequence => passes_consequence(variant, selection),
    }
}

///
/// Composes the facet stages and the search predicate into a filtered view.
/// The resolver supplies the HGVS names the search stage looks at.
///
#[derive(Debug, Clone, Default)]
pub struct FilterEngine<R = RawHgvs> {
    resolver: R,
}

impl<R: HgvsResolver> FilterEngine<R> {
    pub fn new(resolver: R) -> Self {
        FilterEngine { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    ///
    /// Filter `records` by `state`, with `overrides` replacing facet
    /// selections for this call only. Input order is preserved.
    ///
    pub fn apply<'a>(
        &self,
        records: &'a [Variant],
        state: &FilterState,
        overrides: &Overrides,
    ) -> Vec<&'a Variant> {
        let effective = state.with_overrides(overrides);
        let search = SearchPredicate::new(&effective.search);

        let mut remaining: Vec<&'a Variant> = records.iter().collect();
        for stage in STAGE_ORDER {
            if self.is_noop(stage, &effective, &search) {
                continue;
            }
            remaining.retain(|v| self.passes_stage(stage, v, &effective, &search));
        }
        remaining
    }

    /// Whether a single record survives every stage under `state`.
    pub fn passes(&self, variant: &Variant, state: &FilterState) -> bool {
        let search = SearchPredicate::new(&state.search);
        STAGE_ORDER
            .iter()
            .all(|stage| self.passes_stage(*stage, variant, state, &search))
    }

    ///
    /// Whether the search string alone would keep `variant`.
    ///
    pub fn passes_search(&self, variant: &Variant, search: &str) -> bool {
        SearchPredicate::new(search).matches(variant, &self.resolver)
    }

    fn is_noop(&self, stage: Stage, state: &FilterState, search: &SearchPredicate) -> bool {
        match stage {
            Stage::Quality => state.quality.is_all(),
            Stage::Type => state.variant_type.is_all(),
            Stage::Patient => state.patient.is_all(),
            Stage::Consequence => state.consequence.is_all(),
            Stage::Search => search.is_empty(),
        }
    }

    fn passes_stage(
        &self,
        stage: Stage,
        variant: &Variant,
        state: &FilterState,
        search: &SearchPredicate,
    ) -> bool {
        match stage {
            Stage::Quality => passes_quality(variant, &state.quality),
            Stage::Type => passes_type(variant, &state.variant_type),
            Stage::Patient => passes_patient(variant, &state.patient),
            Stage::Consequence => passes_consequence(variant, &state.consequence),
            Stage::Search => search.matches(variant, &self.resolver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn positions(filtered: &[&Variant]) -> Vec<u64> {
        filtered.iter().map(|v| v.position).collect()
    }

    #[fixture]
    fn records() -> Vec<Variant> {
        vec![
            Variant::new(100, "A", "G", "SNV", "P1")
                .with_filter("PASS")
                .with_consequence("missense_variant"),
            Variant::new(200, "AT", "A", "Indel", "P2")
                .with_filter("LOW")
                .with_consequence("frameshift_variant"),
            Variant::new(300, "C", "T", "snv", "P3")
                .with_companion(Variant::new(300, "C", "T", "snv", "P1")),
            Variant::new(400, "G", "GA", "Indel", "P1").with_filter("PASS"),
        ]
    }

    #[rstest]
    fn test_unconstrained_state_returns_everything_in_order(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let filtered = engine.apply(&records, &FilterState::new(), &Overrides::none());
        assert_eq!(positions(&filtered), vec![100, 200, 300, 400]);
    }

    #[rstest]
    fn test_empty_value_selections_are_noops(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let mut state = FilterState::new();
        for facet in Facet::ALL {
            state.set(facet, Selection::Value(String::new()));
        }
        let filtered = engine.apply(&records, &state, &Overrides::none());
        assert_eq!(positions(&filtered), vec![100, 200, 300, 400]);
    }

    #[rstest]
    fn test_missing_quality_passes_every_quality_selection(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        for quality in ["PASS", "LOW", "anything"] {
            let mut state = FilterState::new();
            state.set(Facet::Quality, quality.into());
            let filtered = engine.apply(&records, &state, &Overrides::none());
            assert!(positions(&filtered).contains(&300), "quality {}", quality);
        }
    }

    #[rstest]
    fn test_quality_exact_match(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let mut state = FilterState::new();
        state.set(Facet::Quality, "PASS".into());
        let filtered = engine.apply(&records, &state, &Overrides::none());
        assert_eq!(positions(&filtered), vec![100, 300, 400]);
    }

    #[rstest]
    fn test_type_is_case_insensitive(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let mut state = FilterState::new();
        state.set(Facet::Type, "SNV".into());
        let filtered = engine.apply(&records, &state, &Overrides::none());
        assert_eq!(positions(&filtered), vec![100, 300]);
    }

    #[rstest]
    fn test_patient_matches_companions(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let mut state = FilterState::new();
        state.set(Facet::Patient, "P1".into());
        let filtered = engine.apply(&records, &state, &Overrides::none());
        assert_eq!(positions(&filtered), vec![100, 300, 400]);
    }

    #[rstest]
    fn test_missing_consequence_never_matches(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let mut state = FilterState::new();
        state.set(Facet::Consequence, "missense_variant".into());
        let filtered = engine.apply(&records, &state, &Overrides::none());
        assert_eq!(positions(&filtered), vec![100]);
    }

    #[rstest]
    fn test_stages_compose(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let mut state = FilterState::new();
        state.set(Facet::Patient, "P1".into());
        state.set(Facet::Type, "indel".into());
        state.set_search("ga");
        let filtered = engine.apply(&records, &state, &Overrides::none());
        assert_eq!(positions(&filtered), vec![400]);
    }

    #[rstest]
    fn test_override_replaces_selection_for_one_call(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let mut state = FilterState::new();
        state.set(Facet::Patient, "P2".into());

        let cleared = engine.apply(&records, &state, &Overrides::clearing(Facet::Patient));
        assert_eq!(cleared.len(), 4);

        let swapped = engine.apply(
            &records,
            &state,
            &Overrides::none().with(Facet::Patient, "P3".into()),
        );
        assert_eq!(positions(&swapped), vec![300]);
        assert_eq!(state.patient, Selection::Value("P2".to_string()));
    }

    #[rstest]
    fn test_apply_is_idempotent(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let mut state = FilterState::new();
        state.set(Facet::Quality, "PASS".into());
        state.set_search("p1");

        let first = engine.apply(&records, &state, &Overrides::none());
        let second = engine.apply(&records, &state, &Overrides::none());
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_passes_agrees_with_apply(records: Vec<Variant>) {
        let engine = FilterEngine::new(RawHgvs);
        let mut state = FilterState::new();
        state.set(Facet::Quality, "PASS".into());
        state.set(Facet::Type, "snv".into());

        let filtered = positions(&engine.apply(&records, &state, &Overrides::none()));
        for variant in &records {
            assert_eq!(
                engine.passes(variant, &state),
                filtered.contains(&variant.position)
            );
        }
    }
}
