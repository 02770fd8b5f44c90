use anyhow::Result;
use clap::ArgMatches;
use varlens_core::models::Overrides;
use varlens_filter::FilterEngine;

use crate::shared::{load_cache, load_index, print_variants, state_from_matches};

pub fn run_filter(matches: &ArgMatches) -> Result<()> {
    let index = load_index(matches)?;
    let cache = load_cache(matches)?;
    let state = state_from_matches(matches);

    let engine = FilterEngine::new(&cache);
    let visible = engine.apply(index.variants(), &state, &Overrides::none());

    print_variants(visible.iter().copied(), |v| cache.resolve(v));
    println!("{} of {} variants shown", visible.len(), index.len());
    Ok(())
}
