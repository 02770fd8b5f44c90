use anyhow::Result;
use clap::ArgMatches;
use tabled::{Table, Tabled};
use varlens_core::models::{ALL_LABEL, Facet};
use varlens_filter::{AllFacetCounts, FacetCounter, FilterEngine};

use crate::shared::{load_cache, load_index, state_from_matches};

#[derive(Tabled)]
struct CountRow {
    facet: &'static str,
    value: String,
    count: usize,
}

fn count_rows(counts: &AllFacetCounts) -> Vec<CountRow> {
    let mut rows = Vec::new();
    for facet in Facet::ALL {
        let facet_counts = counts.get(facet);
        rows.push(CountRow {
            facet: facet.name(),
            value: ALL_LABEL.to_string(),
            count: facet_counts.all,
        });
        for (value, count) in &facet_counts.values {
            rows.push(CountRow {
                facet: facet.name(),
                value: value.clone(),
                count: *count,
            });
        }
    }
    rows
}

pub fn run_facets(matches: &ArgMatches) -> Result<()> {
    let index = load_index(matches)?;
    let cache = load_cache(matches)?;
    let state = state_from_matches(matches);

    let engine = FilterEngine::new(&cache);
    let counts = FacetCounter::new(&engine).count_all(index.variants(), &state);

    println!("{}", Table::new(count_rows(&counts)));
    Ok(())
}
