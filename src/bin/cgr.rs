use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cgr_planner::loader::JsonPlanFile;
use cgr_planner::report::TextReport;
use cgr_planner::traits::RouteConsumer;
use cgr_planner::{
    ContactPlan, Ident, PlanError, QueryMode, SearchError, SearchOptions, Suppressions,
    run_queries,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Find contact graph routes in a DTN contact plan.
///
/// With both --src and --dst, routes between that pair; with only one of
/// them, routes from (or to) every other node; with neither, every pair.
#[derive(Parser)]
struct Args {
    /// Path to the JSON contact plan
    file: PathBuf,

    /// Source node id (all digits parse as a number)
    #[arg(long)]
    src: Option<Ident>,

    /// Destination node id (all digits parse as a number)
    #[arg(long)]
    dst: Option<Ident>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Abort a search after this many expansions
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Abort a search after this many milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("failed to write results: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode results: {0}")]
    Json(#[from] serde_json::Error),
}

fn run(args: Args) -> Result<(), CliError> {
    let source = JsonPlanFile::new(&args.file);
    let plan = ContactPlan::load(&source)?;
    info!(plan = %source.name(), contacts = plan.len(), "loaded contact plan");

    let mode = QueryMode::from_endpoints(args.src, args.dst);
    let options = SearchOptions {
        max_iterations: args.max_iterations,
        time_limit: args.time_limit_ms.map(Duration::from_millis),
    };
    let results = run_queries(&plan, &mode, &Suppressions::new(), &options)?;

    let stdout = io::stdout().lock();
    match args.format {
        Format::Text => {
            let mut report = TextReport::new(stdout);
            for result in &results {
                report.consume(result)?;
            }
            report.into_inner().flush()?;
        }
        Format::Json => {
            let mut stdout = stdout;
            serde_json::to_writer_pretty(&mut stdout, &results)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cgr=info,cgr_planner=info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
