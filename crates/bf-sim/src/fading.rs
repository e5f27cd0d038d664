//! Variant whose capacity fades inside the electrical model.

use crate::bess::{BessVariant, VariantParts};
use crate::error::{SimError, SimResult};
use crate::models::{self, ModelSet, R2C_THERMAL, THEVENIN_FADING};
use crate::state::{BessState, StepUpdate};
use bf_core::Real;
use bf_models::{FadingElectricalState, R2CThermalModel, SocModel, TheveninFadingModel};
use bf_project::{BatteryOptions, ModelConfig, ModelType};

/// Thevenin circuit with throughput fading, R2C thermal, no aging model.
///
/// Step order: circuit, parameter fading, heat, SOC against the faded
/// capacity, temperature. SOH is the faded capacity over the nominal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fading;

impl BessVariant for Fading {
    type Electrical = FadingElectricalState;
    type Extra = ();

    const NAME: &'static str = "fading";

    fn build(
        models: &[ModelConfig],
        options: &BatteryOptions,
        _check_soh_every: u64,
    ) -> SimResult<VariantParts<Self>> {
        let set = ModelSet::collect(models)?;
        if set.aging.is_some() {
            return Err(SimError::UnexpectedModel {
                kind: ModelType::Aging,
                variant: Self::NAME,
            });
        }
        let electrical = ModelSet::require(set.electrical, ModelType::Electrical)?;
        let thermal = ModelSet::require(set.thermal, ModelType::Thermal)?;
        models::expect_class(electrical, THEVENIN_FADING)?;
        models::expect_fading(electrical, true)?;
        models::expect_class(thermal, R2C_THERMAL)?;

        let alpha = electrical.alpha_fading.ok_or(SimError::MissingField {
            kind: ModelType::Electrical,
            field: "alpha_fading",
        })?;
        let beta = electrical.beta_fading.ok_or(SimError::MissingField {
            kind: ModelType::Electrical,
            field: "beta_fading",
        })?;

        let electrical_state = TheveninFadingModel::get_init_state(
            alpha,
            beta,
            &electrical.components,
            options.sign_convention,
            &models::electrical_init(options),
        )?;
        Ok(VariantParts {
            electrical_state,
            thermal_state: models::thermal_state(thermal, options)?,
            variant_state: (),
        })
    }

    fn step(state: &BessState<Self>, i: Real, dt: Real, t_amb: Real) -> BessState<Self> {
        let temp = state.thermal_state.temp;
        let soc = state.soc_state.soc;

        let (electrical_state, _, _) =
            TheveninFadingModel::step_current_driven(&state.electrical_state, i, dt, temp, soc);
        let (electrical_state, c_max) =
            TheveninFadingModel::compute_parameter_fading(&electrical_state, state.nominal_capacity);
        let heat = TheveninFadingModel::compute_generated_heat(&electrical_state);

        let (soc_state, curr_soc) = SocModel::compute_soc(&state.soc_state, i, dt, c_max);
        let (thermal_state, _) =
            R2CThermalModel::compute_temp(&state.thermal_state, heat, i, t_amb, curr_soc, dt);

        state.advance(StepUpdate {
            dt,
            c_max,
            soh: c_max / state.nominal_capacity,
            electrical_state,
            thermal_state,
            soc_state,
            variant_state: (),
        })
    }
}
