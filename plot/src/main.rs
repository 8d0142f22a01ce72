use clap::Parser;
use scalan_ledger::{config::ResultsConfig, record::Record, table::ResultsTable};
use std::{path::PathBuf, process::exit};
use tracing::error;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use textplots::{Chart, Plot, Shape};

#[derive(Parser, Debug)]
#[command(name = "scalan-plot", version)]
#[command(about = "Render scalability charts from a recorded results table")]
struct Cli {
    /// problem (matrix) size identifying the series
    size: u64,

    /// directory holding the per-size results tables
    #[arg(long = "results-dir", value_name = "DIR", default_value = "results")]
    results_dir: PathBuf,
}

fn series(records: &[Record], field: impl Fn(&Record) -> f64) -> Vec<(f32, f32)> {
    records
        .iter()
        .map(|record| (record.p as f32, field(record) as f32))
        .collect()
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
    let results = ResultsConfig {
        dir: cli.results_dir,
        ..Default::default()
    };
    let table = ResultsTable::new(results.table_path(cli.size));

    // the table is read-only input here, the ledger is the only writer
    let records = match table.load() {
        Ok(records) if !records.is_empty() => records,
        Ok(_) => {
            error!(path = ?table.path(), "No results recorded for this size yet");
            exit(1);
        }
        Err(error) => {
            error!(path = ?table.path(), "Failed to read results table: {error}");
            exit(1);
        }
    };

    // rows are persisted in ascending p, so the last row carries the x range
    let max_p = records
        .last()
        .map(|record| record.p as f32)
        .unwrap_or(1.0);

    println!("Execution time vs worker count, size {} (dots: ideal)", cli.size);
    Chart::new(160, 48, 0.0, max_p)
        .lineplot(&Shape::Lines(&series(&records, |record| {
            record.execution_time
        })))
        .lineplot(&Shape::Points(&series(&records, |record| {
            record.ideal_execution_time
        })))
        .nice();

    println!("Speedup vs worker count, size {}", cli.size);
    Chart::new(160, 48, 0.0, max_p)
        .lineplot(&Shape::Lines(&series(&records, |record| record.speedup)))
        .nice();

    println!("Efficiency vs worker count, size {}", cli.size);
    Chart::new(160, 48, 0.0, max_p)
        .lineplot(&Shape::Lines(&series(&records, |record| record.efficiency)))
        .nice();
}
