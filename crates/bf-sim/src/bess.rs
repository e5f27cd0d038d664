//! The orchestrator: one battery assembled from its sub-models.

use crate::error::{SimError, SimResult};
use crate::state::BessState;
use crate::{Dropflow, Fading};
use bf_core::{Real, ensure_positive};
use bf_models::{ElectricalReadout, SocModel, ThermalState};
use bf_project::{BatteryOptions, ModelConfig};
use std::fmt::Debug;
use std::marker::PhantomData;
use tracing::info;

/// Sub-model states a variant builds from the model list.
#[derive(Debug, Clone)]
pub struct VariantParts<V: BessVariant> {
    pub electrical_state: V::Electrical,
    pub thermal_state: ThermalState,
    pub variant_state: V::Extra,
}

/// How a battery variant wires its sub-models together.
///
/// The set of variants is closed: `Fading` and `Dropflow`.
pub trait BessVariant: Copy + Debug + PartialEq + Send + Sync + 'static {
    type Electrical: ElectricalReadout + Clone + Debug + PartialEq + Send + Sync;
    type Extra: Clone + Debug + PartialEq + Send + Sync;

    const NAME: &'static str;

    /// Check the model list against this variant and build its parts.
    fn build(
        models: &[ModelConfig],
        options: &BatteryOptions,
        check_soh_every: u64,
    ) -> SimResult<VariantParts<Self>>;

    /// Advance one step under current `i` (A) for `dt` (s) at ambient `t_amb` (°C).
    fn step(state: &BessState<Self>, i: Real, dt: Real, t_amb: Real) -> BessState<Self>;
}

/// Stateless battery orchestrator for variant `V`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bess<V>(PhantomData<V>);

pub type FadingBess = Bess<Fading>;
pub type DropflowBess = Bess<Dropflow>;

impl<V: BessVariant> Bess<V> {
    /// Initial state with a SOH recompute on every step.
    pub fn get_init_state(
        models_config: &[ModelConfig],
        battery_options: &BatteryOptions,
        input_var: &str,
    ) -> SimResult<BessState<V>> {
        Self::get_init_state_every(models_config, battery_options, input_var, 1)
    }

    /// Initial state; `check_soh_every` is the aging cadence in steps.
    ///
    /// Fails before building anything when `input_var` is not `current` or the
    /// model list does not match the variant.
    pub fn get_init_state_every(
        models_config: &[ModelConfig],
        battery_options: &BatteryOptions,
        input_var: &str,
        check_soh_every: u64,
    ) -> SimResult<BessState<V>> {
        if input_var != "current" {
            return Err(SimError::UnsupportedInputVar {
                found: input_var.to_string(),
            });
        }
        if check_soh_every == 0 {
            return Err(SimError::InvalidArg {
                what: "check_soh_every must be at least 1",
            });
        }
        let params = &battery_options.params;
        ensure_positive(params.nominal_capacity, "nominal_capacity")?;

        let parts = V::build(models_config, battery_options, check_soh_every)?;

        let soc = battery_options.bounds.soc;
        let soc_state = SocModel::get_init_state(
            battery_options.init.soc,
            soc.low,
            soc.high,
            battery_options.sign_convention,
        );

        info!(
            variant = V::NAME,
            nominal_capacity = params.nominal_capacity,
            soc = battery_options.init.soc,
            sign_convention = %battery_options.sign_convention,
            "battery initialized"
        );

        Ok(BessState {
            nominal_capacity: params.nominal_capacity,
            nominal_cost: params.nominal_cost,
            nominal_voltage: params.nominal_voltage,
            nominal_dod: params.nominal_dod,
            nominal_lifetime: params.nominal_lifetime,
            c_max: params.nominal_capacity,
            temp_ambient: battery_options.init.temp_ambient,
            v_max: params.v_max,
            v_min: params.v_min,
            elapsed_time: 0.0,
            soh: 1.0,
            electrical_state: parts.electrical_state,
            thermal_state: parts.thermal_state,
            soc_state,
            variant_state: parts.variant_state,
        })
    }

    /// One step under current `i` (A) for `dt` (s) at ambient `t_amb` (°C).
    pub fn step(state: &BessState<V>, i: Real, dt: Real, t_amb: Real) -> BessState<V> {
        V::step(state, i, dt, t_amb)
    }

    /// Currents `(max, min)` that bring `soc` to the SOC bounds in one `dt`.
    pub fn get_feasible_current(state: &BessState<V>, soc: Real, dt: Real) -> (Real, Real) {
        SocModel::get_feasible_current(&state.soc_state, soc, state.c_max, dt)
    }

    /// Feasible currents times the present terminal voltage.
    pub fn get_feasible_power(state: &BessState<V>, soc: Real, dt: Real) -> (Real, Real) {
        let (i_max, i_min) = Self::get_feasible_current(state, soc, dt);
        let v = state.electrical_state.v();
        (i_max * v, i_min * v)
    }
}
