//! Profile runner and result recording.

use crate::bess::{Bess, BessVariant};
use crate::error::{SimError, SimResult};
use crate::state::{BessState, Readout};
use bf_core::Real;
use tracing::debug;

/// Options for profile runs.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Fixed time step (seconds)
    pub dt: Real,
    /// Ambient temperature during the run (°C)
    pub t_amb: Real,
    /// Record every N-th step (decimation)
    pub record_every: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dt: 1.0,
            t_amb: 25.0,
            record_every: 1,
        }
    }
}

/// Recorded snapshots of a run.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Elapsed time of each snapshot (seconds)
    pub t: Vec<Real>,
    pub x: Vec<S>,
}

impl<V: BessVariant> SimRecord<BessState<V>> {
    pub fn readouts(&self) -> Vec<Readout> {
        self.x.iter().map(BessState::readout).collect()
    }
}

/// Apply one current per step, starting from `initial`.
///
/// The initial and final snapshots are always recorded.
pub fn run_profile<V: BessVariant>(
    initial: &BessState<V>,
    currents: &[Real],
    opts: &RunOptions,
) -> SimResult<SimRecord<BessState<V>>> {
    if !(opts.dt.is_finite() && opts.dt > 0.0) {
        return Err(SimError::InvalidArg {
            what: "dt must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }
    debug!(
        variant = V::NAME,
        steps = currents.len(),
        dt = opts.dt,
        "running profile"
    );

    let mut x = initial.clone();
    let mut t_record = vec![x.elapsed_time];
    let mut x_record = vec![x.clone()];

    for (step, &i) in currents.iter().enumerate() {
        x = Bess::step(&x, i, opts.dt, opts.t_amb);
        if (step + 1) % opts.record_every == 0 {
            t_record.push(x.elapsed_time);
            x_record.push(x.clone());
        }
    }
    if currents.len() % opts.record_every != 0 {
        t_record.push(x.elapsed_time);
        x_record.push(x.clone());
    }

    debug!(
        soc = x.soc_state.soc,
        soh = x.soh,
        records = x_record.len(),
        "profile finished"
    );
    Ok(SimRecord {
        t: t_record,
        x: x_record,
    })
}
