//! Closed-economy simulation CLI.
//!
//! Runs a single simulation from a seed and an optional TOML config,
//! prints a summary, and writes the full stats report as JSON.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use econ_core::{run_with_stats, write_stats, SimConfig};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "econ_sim")]
#[command(about = "A closed-economy agent simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of steps to simulate (overrides the config)
    #[arg(long)]
    steps: Option<u64>,

    /// Number of agents (overrides the config)
    #[arg(long)]
    agents: Option<usize>,

    /// Path to a TOML config file; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the JSON stats report
    #[arg(long, default_value = "output/run_stats.json")]
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.steps = steps;
    }
    if let Some(agents) = args.agents {
        config.population = agents;
    }

    println!("Closed Economy Simulation");
    println!("=========================");
    println!("Seed: {}", args.seed);
    println!("Agents: {}", config.population);
    println!("Resources: {}", config.num_resources);
    println!("Steps: {}", config.steps);
    println!();

    let stats = match run_with_stats(&config, args.seed) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = &stats.result;
    println!("Average final balance: {:.2}", result.avg_final_balance);
    println!("Final Gini coefficient: {:.4}", result.final_gini);
    println!("Bankruptcies: {}", result.bankruptcies);
    println!("Average final price: {:.4}", result.avg_final_price);

    if let Err(e) = write_stats(&args.output, &stats) {
        eprintln!("Warning: could not write stats to {}: {}", args.output.display(), e);
    } else {
        println!("Stats written to {}", args.output.display());
    }

    ExitCode::SUCCESS
}
