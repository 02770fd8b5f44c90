use clap::Command;

use crate::shared::{alternatives_arg, filter_args, input_arg};

pub const FACETS_CMD: &str = "facets";

pub fn create_facets_cli() -> Command {
    Command::new(FACETS_CMD)
        .author("Databio")
        .about("Print per-value counts for every facet; each facet ignores its own selection")
        .arg(input_arg())
        .arg(alternatives_arg())
        .args(filter_args())
}
