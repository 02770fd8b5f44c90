mod annotate;
mod facets;
mod filter;
mod reveal;
mod shared;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "varlens";
    pub const BIN_NAME: &str = "varlens";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Faceted filtering, leave-one-out facet counts and HGVS alternative lookup for multi-patient variant call sets.")
        .subcommand_required(true)
        .subcommand(filter::cli::create_filter_cli())
        .subcommand(facets::cli::create_facets_cli())
        .subcommand(reveal::cli::create_reveal_cli())
        .subcommand(annotate::cli::create_annotate_cli())
}

fn main() -> Result<()> {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "warn");
    env_logger::Builder::from_env(env).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // FILTER
        //
        Some((filter::cli::FILTER_CMD, matches)) => {
            filter::handlers::run_filter(matches)?;
        }

        //
        // FACET COUNTS
        //
        Some((facets::cli::FACETS_CMD, matches)) => {
            facets::handlers::run_facets(matches)?;
        }

        //
        // REVEAL A SELECTED VARIANT
        //
        Some((reveal::cli::REVEAL_CMD, matches)) => {
            reveal::handlers::run_reveal(matches)?;
        }

        //
        // HGVS ALTERNATIVES
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_annotate(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_facet_flags_reach_the_filter_state() {
        let matches = build_parser()
            .try_get_matches_from([
                "varlens", "filter", "-i", "variants.json", "--quality", "PASS", "--patient",
                "All", "--search", " NM_ ",
            ])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, filter::cli::FILTER_CMD);

        let state = shared::state_from_matches(sub);
        assert_eq!(state.quality.value(), Some("PASS"));
        assert!(state.patient.is_all());
        assert_eq!(state.search_query(), Some("nm_".to_string()));
    }

    #[rstest]
    fn test_annotate_requires_position() {
        let result = build_parser().try_get_matches_from(["varlens", "annotate", "-i", "v.json"]);
        assert!(result.is_err());
    }
}
