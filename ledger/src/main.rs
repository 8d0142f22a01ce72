use clap::Parser;
use scalan_ledger::{
    config::{LedgerConfig, ResultsConfig},
    record::Observation,
    record_observation,
};
use std::{path::PathBuf, process::exit};
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "scalan-ledger", version)]
#[command(about = "Record one scalability measurement into a per-size results table")]
struct Cli {
    /// worker/process count of this run
    p: u32,

    /// measured wall clock time in seconds
    execution_time: f64,

    /// problem (matrix) size identifying the series
    size: u64,

    /// serial fraction of the program, in [0, 1]
    sequential_fraction: f64,

    /// directory holding the per-size results tables (overrides the config file)
    #[arg(long = "results-dir", value_name = "DIR")]
    results_dir: Option<PathBuf>,

    /// optional YAML config file
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut results = match cli.config {
        Some(ref path) => match LedgerConfig::load(path) {
            Ok(config) => config.results,
            Err(error) => {
                error!(path = ?path, "Failed to load config: {error}");
                exit(1);
            }
        },
        None => ResultsConfig::default(),
    };
    if let Some(dir) = cli.results_dir {
        results.dir = dir;
    }

    let observation = Observation {
        p: cli.p,
        execution_time: cli.execution_time,
        sequential_fraction: cli.sequential_fraction,
    };

    match record_observation(&results, cli.size, observation) {
        Ok(record) => {
            info!(
                p = record.p,
                speedup = record.speedup,
                efficiency = record.efficiency,
                "Recorded run for size {}",
                cli.size
            );
        }
        Err(error) => {
            error!("{error}");
            exit(1);
        }
    }
}
