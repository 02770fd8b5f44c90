use clap::{Arg, Command, value_parser};

use crate::shared::{alternatives_arg, input_arg};

pub const ANNOTATE_CMD: &str = "annotate";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .author("Databio")
        .about("Fetch alternative HGVS names for one variant from the annotation backend")
        .arg(input_arg())
        .arg(alternatives_arg())
        .arg(
            Arg::new("position")
                .long("position")
                .short('p')
                .required(true)
                .value_parser(value_parser!(u64))
                .help("Position of the variant to annotate"),
        )
        .arg(
            Arg::new("patient-of")
                .long("patient-of")
                .help("Pick the record of this patient when several share the position"),
        )
        .arg(
            Arg::new("job")
                .long("job")
                .short('j')
                .help("Job id; fetched alternatives are saved to this job"),
        )
        .arg(
            Arg::new("api")
                .long("api")
                .help("Annotation backend base URL (defaults to $VARLENS_ANNOTATION_API)"),
        )
}
