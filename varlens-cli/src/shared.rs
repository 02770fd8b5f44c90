//! Arguments and output shared by the subcommands.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgMatches};
use tabled::{Table, Tabled};
use varlens_annotate::AnnotationCache;
use varlens_core::models::{Facet, FilterState, Selection, Variant, VariantIndex};
use varlens_core::utils::read_alternatives;

pub fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .required(true)
        .help("Path to the variant JSON file (.json or .json.gz)")
}

pub fn alternatives_arg() -> Arg {
    Arg::new("alternatives")
        .long("alternatives")
        .short('a')
        .help("Path to previously saved HGVS alternatives (JSON object keyed by primary HGVS)")
}

/// One optional flag per facet, plus the free-text search.
pub fn filter_args() -> Vec<Arg> {
    let mut args: Vec<Arg> = Facet::ALL
        .iter()
        .map(|facet| {
            Arg::new(facet.name())
                .long(facet.name())
                .help(format!("Only keep variants with this {} (\"All\" disables)", facet.name()))
        })
        .collect();
    args.push(
        Arg::new("search")
            .long("search")
            .short('s')
            .help("Case-insensitive substring over allele, position, patients and HGVS names"),
    );
    args
}

pub fn state_from_matches(matches: &ArgMatches) -> FilterState {
    let mut state = FilterState::new();
    for facet in Facet::ALL {
        if let Some(raw) = matches.get_one::<String>(facet.name()) {
            state.set(facet, Selection::parse(raw));
        }
    }
    if let Some(search) = matches.get_one::<String>("search") {
        state.set_search(search);
    }
    state
}

pub fn load_index(matches: &ArgMatches) -> Result<VariantIndex> {
    let input = matches
        .get_one::<String>("input")
        .expect("Input path is required");
    Ok(VariantIndex::try_from(PathBuf::from(input).as_path())?)
}

/// An annotation cache seeded from `--alternatives`, when given.
pub fn load_cache(matches: &ArgMatches) -> Result<AnnotationCache> {
    let mut cache = AnnotationCache::new();
    if let Some(path) = matches.get_one::<String>("alternatives") {
        let added = cache.seed(read_alternatives(PathBuf::from(path).as_path())?);
        log::info!("Loaded alternatives for {} variants", added);
    }
    Ok(cache)
}

#[derive(Tabled)]
struct VariantRow {
    position: u64,
    patient: String,
    allele: String,
    #[tabled(rename = "type")]
    variant_type: String,
    quality: String,
    consequence: String,
    hgvs: String,
}

pub fn print_variants<'a>(
    variants: impl IntoIterator<Item = &'a Variant>,
    hgvs_of: impl Fn(&Variant) -> Vec<String>,
) {
    let rows: Vec<VariantRow> = variants
        .into_iter()
        .map(|variant| VariantRow {
            position: variant.position,
            patient: variant.involved_patients().join(","),
            allele: variant.allele_label(),
            variant_type: variant.variant_type.clone(),
            quality: variant.filter.clone().unwrap_or_default(),
            consequence: variant.consequence.clone().unwrap_or_default(),
            hgvs: hgvs_of(variant).join("\n"),
        })
        .collect();
    println!("{}", Table::new(rows));
}
