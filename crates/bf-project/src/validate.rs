//! Project validation logic.
//!
//! Structural checks only. Whether the model list fits the chosen variant is
//! decided when the battery is built.

use crate::schema::{BatteryOptions, ModelConfig, Project};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate {kind} model entry")]
    DuplicateModel { kind: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }
    if project.check_soh_every == 0 {
        return Err(ValidationError::InvalidValue {
            field: "check_soh_every".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for model in &project.models {
        if !seen.insert(model.kind) {
            return Err(ValidationError::DuplicateModel {
                kind: model.kind.to_string(),
            });
        }
        validate_model(model)?;
    }

    validate_battery(&project.battery)
}

fn validate_model(model: &ModelConfig) -> Result<(), ValidationError> {
    for (name, value) in [
        ("alpha_fading", model.alpha_fading),
        ("beta_fading", model.beta_fading),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(invalid(name, v, "must be finite and non-negative"));
            }
        }
    }
    Ok(())
}

fn validate_battery(battery: &BatteryOptions) -> Result<(), ValidationError> {
    let p = &battery.params;
    if !p.nominal_capacity.is_finite() || p.nominal_capacity <= 0.0 {
        return Err(invalid(
            "params.nominal_capacity",
            p.nominal_capacity,
            "must be positive",
        ));
    }
    if !p.nominal_voltage.is_finite() || p.nominal_voltage <= 0.0 {
        return Err(invalid(
            "params.nominal_voltage",
            p.nominal_voltage,
            "must be positive",
        ));
    }
    if p.v_min >= p.v_max {
        return Err(invalid("params.v_min", p.v_min, "must be below v_max"));
    }

    let soc = battery.bounds.soc;
    if !(0.0..=1.0).contains(&soc.low) || !(0.0..=1.0).contains(&soc.high) {
        return Err(invalid("bounds.soc", soc.low, "bounds must lie in [0, 1]"));
    }
    if soc.low >= soc.high {
        return Err(invalid("bounds.soc.low", soc.low, "must be below high"));
    }

    let init = &battery.init;
    if !(soc.low..=soc.high).contains(&init.soc) {
        return Err(invalid("init.soc", init.soc, "outside soc bounds"));
    }
    for (name, v) in [
        ("init.temperature", init.temperature),
        ("init.temp_ambient", init.temp_ambient),
    ] {
        if !v.is_finite() {
            return Err(invalid(name, v, "must be finite"));
        }
    }
    Ok(())
}
