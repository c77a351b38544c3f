use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use allocsim::config::Config;
use allocsim::config_loader;
use allocsim::experiment::{build_report, generate_json_report, render_text_report, run_experiment};

/// Stable-matching simulator for address block allocation to Autonomous Systems
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the experiment configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output path for the JSON report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of trials (overrides the configuration file)
    #[arg(long)]
    trials: Option<usize>,

    /// Requesting ASes per trial (overrides the configuration file)
    #[arg(long)]
    as_count: Option<usize>,

    /// Allocatable blocks per trial (overrides the configuration file)
    #[arg(long)]
    block_count: Option<usize>,

    /// RNG seed for reproducible experiments (overrides the configuration file)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting allocsim experiment runner");

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => {
            info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    // CLI overrides take precedence over the configuration file
    if let Some(trials) = args.trials {
        config.experiment.trials = trials;
    }
    if let Some(as_count) = args.as_count {
        config.experiment.as_count = as_count;
    }
    if let Some(block_count) = args.block_count {
        config.experiment.block_count = block_count;
    }
    if let Some(seed) = args.seed {
        config.experiment.seed = Some(seed);
    }

    // Re-validate after applying overrides
    config.validate()?;

    let results = run_experiment(&config)?;
    let report = build_report(&config, results);

    println!("{}", render_text_report(&report));

    if let Some(output) = &args.output {
        generate_json_report(&report, output)?;
    }

    info!("Experiment completed successfully");
    Ok(())
}
