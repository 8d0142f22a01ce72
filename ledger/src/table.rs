use crate::record::Record;
use itertools::Itertools;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("results table could not be accessed: {0}")]
    Unreadable(#[from] std::io::Error),
    #[error("results table is malformed: {0}")]
    Malformed(#[from] csv::Error),
}

/// Persisted results table of one series, stored as a CSV file with a
/// fixed schema and one row per worker count.
///
/// Every write is a full rewrite of the file in ascending order of `p`;
/// a load -> merge -> rewrite cycle is not atomic and assumes a single
/// writer per table at a time.
// TODO: write to a temp file and rename into place so a crashed writer
// cannot leave a truncated table behind
#[derive(Debug, Clone)]
pub struct ResultsTable {
    path: PathBuf,
}

impl ResultsTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all rows of the table. An absent file is an empty series,
    /// not an error, so a first-ever `p == 1` run can proceed.
    pub fn load(&self) -> Result<Vec<Record>, TableError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();

        for row in reader.records() {
            // deserialize by position so localized header labels in old
            // tables do not change the field semantics
            records.push(row?.deserialize(None)?);
        }

        Ok(records)
    }

    /// Sequential (`p == 1`) execution time of the persisted table, if any.
    pub fn sequential_time(&self) -> Result<Option<f64>, TableError> {
        Ok(self
            .load()?
            .iter()
            .find(|record| record.p == 1)
            .map(|record| record.execution_time))
    }

    /// Overwrite the table with the given rows, sorted by ascending `p`.
    /// Sorting on every write re-establishes the order invariant
    /// regardless of insertion order.
    pub fn save(&self, records: Vec<Record>) -> Result<(), TableError> {
        let mut writer = csv::Writer::from_path(&self.path)?;

        for record in records.into_iter().sorted_by_key(|record| record.p) {
            writer.serialize(record)?;
        }
        writer.flush()?;

        Ok(())
    }

    /// Last-write-wins upsert keyed by `p`: a later row for the same
    /// worker count fully supersedes the earlier one, no field merging.
    pub fn upsert(&self, new_record: Record) -> Result<(), TableError> {
        let mut records = self.load()?;

        match records
            .iter_mut()
            .find(|record| record.p == new_record.p)
        {
            Some(existing) => {
                debug!(p = new_record.p, "Replacing existing row");
                *existing = new_record;
            }
            None => {
                debug!(p = new_record.p, "Appending new row");
                records.push(new_record);
            }
        }

        self.save(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive;
    use crate::record::Observation;
    use std::fs;
    use tempfile::tempdir;

    fn record(p: u32, execution_time: f64) -> Record {
        derive(
            Observation {
                p,
                execution_time,
                sequential_fraction: 0.1,
            },
            100.0,
        )
    }

    #[test]
    fn absent_table_loads_empty() {
        let dir = tempdir().unwrap();
        let table = ResultsTable::new(dir.path().join("results512.csv"));

        assert!(table.load().unwrap().is_empty());
        assert!(table.sequential_time().unwrap().is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let table = ResultsTable::new(dir.path().join("results512.csv"));
        let records = vec![record(1, 100.0), record(2, 55.0), record(4, 30.0)];

        table.save(records.clone()).unwrap();

        assert_eq!(table.load().unwrap(), records);
    }

    #[test]
    fn header_row_is_the_fixed_schema() {
        let dir = tempdir().unwrap();
        let table = ResultsTable::new(dir.path().join("results512.csv"));

        table.save(vec![record(1, 100.0)]).unwrap();

        let contents = fs::read_to_string(table.path()).unwrap();
        assert_eq!(
            contents.lines().next().unwrap(),
            "p,execution_time,ideal_execution_time,speedup,efficiency,\
             sequential_fraction,amdahl,gustafson"
        );
    }

    #[test]
    fn upsert_keeps_one_row_per_worker_count() {
        let dir = tempdir().unwrap();
        let table = ResultsTable::new(dir.path().join("results512.csv"));

        table.upsert(record(4, 32.0)).unwrap();
        table.upsert(record(4, 30.0)).unwrap();

        let records = table.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].execution_time, 30.0);
    }

    #[test]
    fn out_of_order_upserts_end_up_sorted() {
        let dir = tempdir().unwrap();
        let table = ResultsTable::new(dir.path().join("results512.csv"));

        for p in [4, 2, 1] {
            table.upsert(record(p, 100.0 / f64::from(p))).unwrap();
        }

        let keys = table
            .load()
            .unwrap()
            .iter()
            .map(|record| record.p)
            .collect::<Vec<_>>();
        assert_eq!(keys, vec![1, 2, 4]);
    }

    #[test]
    fn sequential_time_finds_the_baseline_row() {
        let dir = tempdir().unwrap();
        let table = ResultsTable::new(dir.path().join("results512.csv"));

        table.save(vec![record(2, 55.0), record(1, 100.0)]).unwrap();

        assert_eq!(table.sequential_time().unwrap(), Some(100.0));
    }

    #[test]
    fn malformed_rows_are_a_hard_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results512.csv");
        fs::write(&path, "p,execution_time\nnot-a-number,1.0\n").unwrap();

        let table = ResultsTable::new(path);
        assert!(matches!(table.load(), Err(TableError::Malformed(_))));
    }
}
