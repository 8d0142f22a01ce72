use crate::record::{Observation, Record};

/// Compute all derived fields for a new observation.
///
/// `baseline` is the sequential (`p == 1`) execution time the ratios are
/// taken against. A `p == 1` observation is always its own baseline, so
/// callers pass its `execution_time` back in instead of looking one up.
pub fn derive(observation: Observation, baseline: f64) -> Record {
    let Observation {
        p,
        execution_time,
        sequential_fraction,
    } = observation;
    let workers = f64::from(p);

    let ideal_execution_time = if p == 1 {
        execution_time
    } else {
        baseline / workers
    };
    let speedup = baseline / execution_time;
    let efficiency = speedup / workers;

    // theoretical bounds, independent of the measured baseline
    let amdahl = 1.0 / (sequential_fraction + (1.0 - sequential_fraction) / workers);
    let gustafson = workers - (workers - 1.0) * sequential_fraction;

    Record {
        p,
        execution_time,
        ideal_execution_time,
        speedup,
        efficiency,
        sequential_fraction,
        amdahl,
        gustafson,
    }
}
