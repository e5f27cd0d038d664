//! Lockstep stepping of many independent batteries.

use crate::bess::{Bess, BessVariant};
use crate::error::{SimError, SimResult};
use crate::state::BessState;
use bf_core::Real;
use rayon::prelude::*;

/// Step every battery with its own current, in parallel.
///
/// Output order matches input order.
pub fn step_batch<V: BessVariant>(
    states: &[BessState<V>],
    currents: &[Real],
    dt: Real,
    t_amb: Real,
) -> SimResult<Vec<BessState<V>>> {
    if states.len() != currents.len() {
        return Err(SimError::InvalidArg {
            what: "one current per battery required",
        });
    }
    Ok(states
        .par_iter()
        .zip(currents.par_iter())
        .map(|(state, &i)| Bess::step(state, i, dt, t_amb))
        .collect())
}

/// Feasible current bounds of every battery at its own SOC.
pub fn feasible_current_batch<V: BessVariant>(
    states: &[BessState<V>],
    dt: Real,
) -> Vec<(Real, Real)> {
    states
        .par_iter()
        .map(|state| Bess::get_feasible_current(state, state.soc_state.soc, dt))
        .collect()
}
