use anyhow::{Result, anyhow};
use clap::ArgMatches;
use varlens_core::models::Overrides;
use varlens_filter::{FilterEngine, VisibilityReconciler};

use crate::shared::{load_cache, load_index, state_from_matches};

pub fn run_reveal(matches: &ArgMatches) -> Result<()> {
    let index = load_index(matches)?;
    let cache = load_cache(matches)?;
    let mut state = state_from_matches(matches);

    let position = *matches
        .get_one::<u64>("position")
        .expect("Position is required");
    let patient = matches.get_one::<String>("patient-of").map(String::as_str);
    let variant = index
        .find(position, patient)
        .ok_or_else(|| anyhow!("No variant at position {}", position))?;

    let engine = FilterEngine::new(&cache);
    let reconciler = VisibilityReconciler::new(&engine);
    let conflicts = reconciler.conflicts(variant, &state);
    reconciler.ensure_visible(variant, &mut state);

    if conflicts.is_empty() {
        println!("{} is already visible", variant);
    } else {
        let cleared: Vec<String> = conflicts.iter().map(|d| d.to_string()).collect();
        println!("Cleared {} to reveal {}", cleared.join(", "), variant);
    }
    println!("{}", serde_json::to_string_pretty(&state)?);

    let visible = engine.apply(index.variants(), &state, &Overrides::none());
    println!("{} of {} variants visible", visible.len(), index.len());
    Ok(())
}
