//! Variant whose capacity follows an explicit Bolun aging model.

use crate::bess::{BessVariant, VariantParts};
use crate::error::SimResult;
use crate::models::{self, BOLUN_DROPFLOW, ModelSet, R2C_THERMAL, THEVENIN};
use crate::state::{BessState, StepUpdate};
use bf_core::Real;
use bf_models::{
    BolunDropflowModel, BolunDropflowState, ElectricalState, R2CThermalModel, SocModel,
    TheveninModel,
};
use bf_project::{BatteryOptions, ModelConfig, ModelType};

/// Aging part of a dropflow battery.
#[derive(Debug, Clone, PartialEq)]
pub struct DropflowState {
    pub aging_state: BolunDropflowState,
    /// Completed steps
    pub iter: u64,
    /// SOH is recomputed on steps where `iter % check_soh_every == 0`
    pub check_soh_every: u64,
}

/// Plain Thevenin circuit, R2C thermal and Bolun dropflow aging.
///
/// Step order: circuit, heat, SOC against the nominal capacity, temperature,
/// aging. The aging model sees the new temperature and SOC, the reference
/// ambient temperature fixed at init and the time before the step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dropflow;

impl BessVariant for Dropflow {
    type Electrical = ElectricalState;
    type Extra = DropflowState;

    const NAME: &'static str = "degrading_dropflow";

    fn build(
        models: &[ModelConfig],
        options: &BatteryOptions,
        check_soh_every: u64,
    ) -> SimResult<VariantParts<Self>> {
        let set = ModelSet::collect(models)?;
        let electrical = ModelSet::require(set.electrical, ModelType::Electrical)?;
        let thermal = ModelSet::require(set.thermal, ModelType::Thermal)?;
        let aging = ModelSet::require(set.aging, ModelType::Aging)?;
        models::expect_class(electrical, THEVENIN)?;
        models::expect_fading(electrical, false)?;
        models::expect_class(thermal, R2C_THERMAL)?;
        models::expect_class(aging, BOLUN_DROPFLOW)?;

        let electrical_state = TheveninModel::get_init_state(
            &electrical.components,
            &models::electrical_init(options),
            options.sign_convention,
        )?;
        let aging_state = BolunDropflowModel::get_init_state(
            &aging.components,
            aging.stress_models.unwrap_or_default(),
        )?;
        Ok(VariantParts {
            electrical_state,
            thermal_state: models::thermal_state(thermal, options)?,
            variant_state: DropflowState {
                aging_state,
                iter: 0,
                check_soh_every,
            },
        })
    }

    fn step(state: &BessState<Self>, i: Real, dt: Real, t_amb: Real) -> BessState<Self> {
        let temp = state.thermal_state.temp;
        let soc = state.soc_state.soc;
        let aging = &state.variant_state;

        let (electrical_state, _, _) =
            TheveninModel::step_current_driven(&state.electrical_state, i, dt, temp, soc);
        let heat = TheveninModel::compute_generated_heat(&electrical_state);

        let (soc_state, curr_soc) =
            SocModel::compute_soc(&state.soc_state, i, dt, state.nominal_capacity);
        let (thermal_state, curr_temp) =
            R2CThermalModel::compute_temp(&state.thermal_state, heat, i, t_amb, curr_soc, dt);

        let recompute = aging.iter % aging.check_soh_every == 0;
        let (aging_state, soh) = BolunDropflowModel::compute_soh(
            &aging.aging_state,
            curr_temp,
            state.temp_ambient,
            curr_soc,
            state.elapsed_time,
            recompute,
        );

        state.advance(StepUpdate {
            dt,
            c_max: soh * state.nominal_capacity,
            soh,
            electrical_state,
            thermal_state,
            soc_state,
            variant_state: DropflowState {
                aging_state,
                iter: aging.iter + 1,
                check_soh_every: aging.check_soh_every,
            },
        })
    }
}

impl BessState<Dropflow> {
    pub fn iter(&self) -> u64 {
        self.variant_state.iter
    }

    pub fn aging_state(&self) -> &BolunDropflowState {
        &self.variant_state.aging_state
    }
}
