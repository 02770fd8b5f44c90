use clap::Command;

use crate::shared::{alternatives_arg, filter_args, input_arg};

pub const FILTER_CMD: &str = "filter";

pub fn create_filter_cli() -> Command {
    Command::new(FILTER_CMD)
        .author("Databio")
        .about("Print the variants that survive the given facet selections and search")
        .arg(input_arg())
        .arg(alternatives_arg())
        .args(filter_args())
}
