//! Thevenin circuit whose parameters fade with charge throughput.

use crate::components::Components;
use crate::electrical::{ElectricalInit, ElectricalReadout, ElectricalState, TheveninModel};
use crate::error::{ModelError, ModelResult};
use bf_core::{Real, SignConvention, seconds_to_hours};

/// Thevenin state plus the fading bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct FadingElectricalState {
    pub thevenin: ElectricalState,
    /// Relative growth of r0 per Ah of throughput
    pub alpha_fading: Real,
    /// Relative capacity loss per Ah of throughput
    pub beta_fading: Real,
    /// Accumulated absolute charge throughput (Ah)
    pub q_throughput: Real,
    /// Present multiplier applied to r0
    pub r0_growth: Real,
}

impl ElectricalReadout for FadingElectricalState {
    fn thevenin(&self) -> &ElectricalState {
        &self.thevenin
    }
}

/// Stateless fading model.
///
/// ```text
/// r0_growth = 1 + alpha_fading * q
/// c_max     = c_nominal * (1 - beta_fading * q)
/// ```
///
/// where `q` is the absolute charge throughput in Ah.
pub struct TheveninFadingModel;

impl TheveninFadingModel {
    pub fn get_init_state(
        alpha_fading: Real,
        beta_fading: Real,
        components: &Components,
        sign_convention: SignConvention,
        inits: &ElectricalInit,
    ) -> ModelResult<FadingElectricalState> {
        if !(alpha_fading.is_finite() && alpha_fading >= 0.0) {
            return Err(ModelError::InvalidArg {
                what: "alpha_fading must be finite and non-negative",
            });
        }
        if !(beta_fading.is_finite() && beta_fading >= 0.0) {
            return Err(ModelError::InvalidArg {
                what: "beta_fading must be finite and non-negative",
            });
        }

        Ok(FadingElectricalState {
            thevenin: TheveninModel::get_init_state(components, inits, sign_convention)?,
            alpha_fading,
            beta_fading,
            q_throughput: 0.0,
            r0_growth: 1.0,
        })
    }

    /// Advance the circuit with the present r0 growth and count the throughput.
    pub fn step_current_driven(
        state: &FadingElectricalState,
        i: Real,
        dt: Real,
        temp: Real,
        soc: Real,
    ) -> (FadingElectricalState, Real, Real) {
        let (thevenin, v, i) =
            TheveninModel::step_scaled(&state.thevenin, i, dt, temp, soc, state.r0_growth);
        let next = FadingElectricalState {
            thevenin,
            q_throughput: state.q_throughput + seconds_to_hours(i.abs() * dt),
            ..state.clone()
        };
        (next, v, i)
    }

    /// Update the faded parameters from the accumulated throughput.
    ///
    /// The stored heat `q` is refreshed with the grown `r0`; the voltages
    /// keep the values of the step that produced them.
    ///
    /// Returns the new state and the effective capacity (Ah).
    pub fn compute_parameter_fading(
        state: &FadingElectricalState,
        nominal_capacity: Real,
    ) -> (FadingElectricalState, Real) {
        let r0_growth = 1.0 + state.alpha_fading * state.q_throughput;
        let c_max = nominal_capacity * (1.0 - state.beta_fading * state.q_throughput);

        let mut thevenin = state.thevenin.clone();
        thevenin.r0 = thevenin.r0 / state.r0_growth * r0_growth;
        thevenin.q = TheveninModel::compute_generated_heat(&thevenin);

        let next = FadingElectricalState {
            thevenin,
            r0_growth,
            ..state.clone()
        };
        (next, c_max)
    }

    /// Joule heat (W) with the faded resistance.
    pub fn compute_generated_heat(state: &FadingElectricalState) -> Real {
        TheveninModel::compute_generated_heat(&state.thevenin)
    }
}
