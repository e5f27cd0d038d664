//! Model-list checks shared by both variants.

use crate::error::{SimError, SimResult};
use bf_models::{ElectricalInit, R2CThermalModel, ThermalState};
use bf_project::{BatteryOptions, ModelConfig, ModelType};
use tracing::debug;

pub(crate) const THEVENIN: &str = "TheveninModel";
pub(crate) const THEVENIN_FADING: &str = "TheveninFadingModel";
pub(crate) const R2C_THERMAL: &str = "R2CThermal";
pub(crate) const BOLUN_DROPFLOW: &str = "BolunDropflowModel";

/// At most one entry per model type.
#[derive(Debug, Default)]
pub(crate) struct ModelSet<'a> {
    pub electrical: Option<&'a ModelConfig>,
    pub thermal: Option<&'a ModelConfig>,
    pub aging: Option<&'a ModelConfig>,
}

impl<'a> ModelSet<'a> {
    pub fn collect(models: &'a [ModelConfig]) -> SimResult<Self> {
        let mut set = Self::default();
        for model in models {
            let slot = match model.kind {
                ModelType::Electrical => &mut set.electrical,
                ModelType::Thermal => &mut set.thermal,
                ModelType::Aging => &mut set.aging,
            };
            if slot.replace(model).is_some() {
                return Err(SimError::DuplicateModel { kind: model.kind });
            }
            debug!(kind = %model.kind, class = %model.class_name, "model entry");
        }
        Ok(set)
    }

    pub fn require(slot: Option<&'a ModelConfig>, kind: ModelType) -> SimResult<&'a ModelConfig> {
        slot.ok_or(SimError::MissingModel { kind })
    }
}

pub(crate) fn expect_class(model: &ModelConfig, expected: &'static str) -> SimResult<()> {
    if model.class_name != expected {
        return Err(SimError::ClassMismatch {
            kind: model.kind,
            expected,
            found: model.class_name.clone(),
        });
    }
    Ok(())
}

pub(crate) fn expect_fading(model: &ModelConfig, expected: bool) -> SimResult<()> {
    if model.use_fading != Some(expected) {
        return Err(SimError::CapabilityMismatch {
            kind: model.kind,
            flag: "use_fading",
            expected,
            found: model.use_fading,
        });
    }
    Ok(())
}

pub(crate) fn electrical_init(options: &BatteryOptions) -> ElectricalInit {
    ElectricalInit {
        soc: options.init.soc,
        temperature: options.init.temperature,
        voltage: options.init.voltage,
        i_r1: options.init.i_r1,
    }
}

/// Thermal state from an already class-checked entry.
pub(crate) fn thermal_state(model: &ModelConfig, options: &BatteryOptions) -> SimResult<ThermalState> {
    Ok(R2CThermalModel::get_init_state(
        &model.components,
        options.init.temperature,
        options.sign_convention,
    )?)
}
