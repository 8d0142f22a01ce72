use serde::{Deserialize, Serialize};
use tracing::error;

/// One row of a series' results table.
/// The worker count `p` is the row's identity key, everything after
/// `execution_time` is derived by `metrics::derive`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub p: u32,
    pub execution_time: f64,
    pub ideal_execution_time: f64,
    pub speedup: f64,
    pub efficiency: f64,
    pub sequential_fraction: f64,
    pub amdahl: f64,
    pub gustafson: f64,
}

#[derive(Debug, Clone, Copy)]
/// A single raw measurement as supplied by the benchmark harness,
/// before any metric derivation
pub struct Observation {
    /// worker/process count of the run
    pub p: u32,
    /// measured wall clock time in seconds
    pub execution_time: f64,
    /// serial fraction of the program, in [0, 1]
    pub sequential_fraction: f64,
}

impl Observation {
    /// Validate the observation at the boundary, before any storage is touched.
    // attempt to catch all errors instead of piece-by-piece to make debugging easier for users
    pub fn preflight_checks(&self) -> bool {
        let mut contains_error = false;

        if self.p < 1 {
            error!("p must be at least 1, got {}", self.p);
            contains_error = true;
        }

        if !self.execution_time.is_finite() || self.execution_time <= 0.0 {
            error!(
                "execution_time must be a finite positive number of seconds, got {}",
                self.execution_time
            );
            contains_error = true;
        }

        if !self.sequential_fraction.is_finite()
            || !(0.0..=1.0).contains(&self.sequential_fraction)
        {
            error!(
                "sequential_fraction must lie in [0, 1], got {}",
                self.sequential_fraction
            );
            contains_error = true;
        }

        contains_error
    }
}
