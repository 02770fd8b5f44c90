use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use tokio::runtime::Runtime;
use varlens_annotate::FetchOutcome;
use varlens_annotate::client::HttpAnnotationService;
use varlens_core::notify::LogSink;
use varlens_core::utils::read_alternatives;
use varlens_session::ViewSession;

use crate::shared::{load_index, print_variants};

pub fn run_annotate(matches: &ArgMatches) -> Result<()> {
    let index = load_index(matches)?;

    let position = *matches
        .get_one::<u64>("position")
        .expect("Position is required");
    let patient = matches.get_one::<String>("patient-of").map(String::as_str);
    let variant = index
        .find(position, patient)
        .cloned()
        .ok_or_else(|| anyhow!("No variant at position {}", position))?;

    let mut builder = HttpAnnotationService::builder();
    if let Some(api) = matches.get_one::<String>("api") {
        builder = builder.with_api(api.clone());
    }
    let service = Arc::new(builder.finish()?);

    let mut session = ViewSession::new(index, service, Arc::new(LogSink));
    if let Some(job_id) = matches.get_one::<String>("job") {
        session = session.with_job(job_id);
    }
    if let Some(path) = matches.get_one::<String>("alternatives") {
        session.seed_alternatives(read_alternatives(PathBuf::from(path).as_path())?);
    }

    let runtime = Runtime::new().context("Failed to start the async runtime")?;
    match runtime.block_on(session.request_annotation(&variant)) {
        FetchOutcome::Skipped(reason) => println!("Not fetched: {}", reason),
        FetchOutcome::Resolved(alternatives) => {
            println!("Received {} alternatives", alternatives.len())
        }
        FetchOutcome::Failed(message) => return Err(anyhow!(message)),
    }

    print_variants([&variant], |v| session.hgvs_for(v));
    Ok(())
}
