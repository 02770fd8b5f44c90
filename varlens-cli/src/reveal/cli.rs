use clap::{Arg, Command, value_parser};

use crate::shared::{alternatives_arg, filter_args, input_arg};

pub const REVEAL_CMD: &str = "reveal";

pub fn create_reveal_cli() -> Command {
    Command::new(REVEAL_CMD)
        .author("Databio")
        .about("Relax just the filters that hide the selected variant and print the resulting state")
        .arg(input_arg())
        .arg(alternatives_arg())
        .arg(
            Arg::new("position")
                .long("position")
                .short('p')
                .required(true)
                .value_parser(value_parser!(u64))
                .help("Position of the selected variant"),
        )
        .arg(
            Arg::new("patient-of")
                .long("patient-of")
                .help("Pick the record of this patient when several share the position"),
        )
        .args(filter_args())
}
