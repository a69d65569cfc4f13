//! Command-line entry point.
//!
//! ```text
//! mercator run <initial_state.csv> <weights.csv> <output_dir> [--run <run.json>]
//! mercator demo <output_dir> [--run <run.json>]
//! ```
//!
//! Runs the built-in template catalog against the loaded (or built-in demo)
//! world, writes the report directory, and prints the run summary as JSON.
//! Log verbosity follows `RUST_LOG` (default `info`). Usage errors exit
//! with status 2, run failures with status 1.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mercator_harness::config::{CsvWorld, RunParameters};
use mercator_harness::contract::EconomyWorldV1;
use mercator_harness::report_dir::write_report_dir;
use mercator_harness::runner::run;
use mercator_harness::worlds::economy::DemoEconomy;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mercator",
    about = "Plan transform and transfer schedules for one agent of a resource economy",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plan against a world loaded from CSV tables.
    Run {
        /// Agent table: `Country` column plus one column per resource.
        initial_state: PathBuf,
        /// Weight table: `Resource,Weight`.
        weights: PathBuf,
        /// Report directory to create or overwrite.
        output_dir: PathBuf,
        /// Run parameters as JSON; defaults apply when omitted.
        #[arg(long)]
        run: Option<PathBuf>,
    },
    /// Plan against the built-in two-country economy.
    Demo {
        /// Report directory to create or overwrite.
        output_dir: PathBuf,
        /// Run parameters as JSON; defaults apply when omitted.
        #[arg(long)]
        run: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_parameters(path: Option<&Path>) -> Result<RunParameters, String> {
    match path {
        Some(p) => RunParameters::load(p).map_err(|e| e.to_string()),
        None => Ok(RunParameters::default()),
    }
}

fn execute(
    world: &dyn EconomyWorldV1,
    params: &RunParameters,
    output_dir: &Path,
) -> Result<(), String> {
    let outcome = run(world, params).map_err(|e| e.to_string())?;
    let report = outcome.report();
    write_report_dir(&report, output_dir).map_err(|e| e.to_string())?;
    tracing::info!(
        output_dir = %output_dir.display(),
        digest = %report.digest,
        schedules = report.log.records.len(),
        "report written"
    );
    let summary = serde_json::to_string_pretty(&outcome.summary_json()).map_err(|e| e.to_string())?;
    println!("{summary}");
    Ok(())
}

fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Run {
            initial_state,
            weights,
            output_dir,
            run,
        } => {
            let params = load_parameters(run.as_deref())?;
            let world = CsvWorld::load(initial_state, weights).map_err(|e| e.to_string())?;
            execute(&world, &params, output_dir)
        }
        Command::Demo { output_dir, run } => {
            let params = load_parameters(run.as_deref())?;
            execute(&DemoEconomy, &params, output_dir)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match dispatch(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!(%message, "run failed");
            ExitCode::FAILURE
        }
    }
}
