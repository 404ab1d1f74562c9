//! Parameter sweep CLI.
//!
//! Runs the standard sweep against a base configuration, logs which
//! parameter values optimize the headline outcomes, and writes the full
//! report as JSON.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use econ_core::SimConfig;
use sweep::{default_ranges, run_sweep, write_report};

/// Command line arguments for the sweep
#[derive(Parser, Debug)]
#[command(name = "econ_sweep")]
#[command(about = "Parameter experimentation for the closed-economy simulation")]
struct Args {
    /// Base random seed; each run offsets from it
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Path to a TOML config file for the base configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the JSON sweep report
    #[arg(long, default_value = "output/sweep_report.json")]
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let base = match &args.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };

    tracing::info!("starting parameter experimentation");

    let report = match run_sweep(&base, &default_ranges(), args.seed) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let summary = report.summary();
    tracing::info!(runs = summary.total_runs, "experimentation complete");
    if let Some(rate) = summary.best_tax_rate {
        tracing::info!("tax rate that minimizes bankruptcies: {rate}");
    }
    if let Some(rate) = summary.best_regen_rate {
        tracing::info!("regen rate that maximizes average final balance: {rate}");
    }

    if let Err(e) = write_report(&args.output, &report) {
        eprintln!("Warning: could not write report to {}: {}", args.output.display(), e);
    } else {
        println!("Report written to {}", args.output.display());
    }

    ExitCode::SUCCESS
}
