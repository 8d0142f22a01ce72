pub mod config;
pub mod metrics;
pub mod record;
pub mod table;

use config::ResultsConfig;
use record::{Observation, Record};
use std::fs;
use table::{ResultsTable, TableError};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("observation failed validation")]
    InvalidObservation,
    #[error("no sequential (p = 1) run recorded for this size yet, record p = 1 first")]
    MissingBaseline,
    #[error("results directory could not be created: {0}")]
    CreateResultsDir(#[source] std::io::Error),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Record one measurement into its series' results table.
///
/// One full load -> derive -> upsert -> rewrite cycle; no state is kept
/// across invocations. The baseline is resolved against the table as
/// persisted on disk, before the new row is merged in, and nothing is
/// written until the full new row has been derived.
#[tracing::instrument(level = "debug", skip(results))]
pub fn record_observation(
    results: &ResultsConfig,
    size: u64,
    observation: Observation,
) -> Result<Record, LedgerError> {
    if observation.preflight_checks() {
        return Err(LedgerError::InvalidObservation);
    }

    let table = ResultsTable::new(results.table_path(size));

    // a p = 1 run is its own baseline and never looked up
    let baseline = if observation.p == 1 {
        observation.execution_time
    } else {
        table
            .sequential_time()?
            .ok_or(LedgerError::MissingBaseline)?
    };

    let record = metrics::derive(observation, baseline);

    fs::create_dir_all(&results.dir).map_err(LedgerError::CreateResultsDir)?;
    table.upsert(record.clone())?;

    debug!(path = ?table.path(), p = record.p, "Recorded observation");

    Ok(record)
}
