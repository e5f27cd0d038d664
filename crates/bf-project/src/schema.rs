//! Project schema definitions.

use bf_core::SignConvention;
use bf_models::{Components, StressModels};
use serde::{Deserialize, Serialize};

/// One battery setup: which orchestrator variant, which sub-models, which cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub variant: VariantKind,
    /// Control variable imposed by the caller; only `current` is supported
    #[serde(default = "default_input_var")]
    pub input_var: String,
    /// Aging recompute cadence in steps (degrading-dropflow only)
    #[serde(default = "default_check_soh_every")]
    pub check_soh_every: u64,
    #[serde(default)]
    pub models: Vec<ModelConfig>,
    pub battery: BatteryOptions,
}

fn default_input_var() -> String {
    "current".to_string()
}

fn default_check_soh_every() -> u64 {
    1
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// Capacity fades inside the electrical model
    Fading,
    /// Capacity follows the SOH of an explicit aging model
    DegradingDropflow,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Electrical,
    Thermal,
    Aging,
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelType::Electrical => write!(f, "electrical"),
            ModelType::Thermal => write!(f, "thermal"),
            ModelType::Aging => write!(f, "aging"),
        }
    }
}

/// One sub-model entry of `models_config`.
///
/// ```yaml
/// - type: electrical
///   class_name: TheveninModel
///   use_fading: false
///   components:
///     r0: 0.0085
///     r1: 0.0042
///     c: 12000.0
///     v_ocv:
///       temperatures: [25.0]
///       socs: [0.0, 0.5, 1.0]
///       values: [[3.0, 3.6, 4.2]]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    #[serde(rename = "type")]
    pub kind: ModelType,
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_fading: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_fading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_fading: Option<f64>,
    #[serde(default)]
    pub components: Components,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_models: Option<StressModels>,
}

/// The `battery_options` block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatteryOptions {
    pub params: BatteryParams,
    pub init: InitDef,
    pub bounds: BoundsDef,
    #[serde(default)]
    pub sign_convention: SignConvention,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatteryParams {
    /// Ah
    pub nominal_capacity: f64,
    pub nominal_cost: f64,
    /// V
    pub nominal_voltage: f64,
    pub nominal_dod: f64,
    /// Cycles
    pub nominal_lifetime: f64,
    pub v_max: f64,
    pub v_min: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitDef {
    pub soc: f64,
    /// Battery temperature (°C)
    pub temperature: f64,
    /// Reference ambient temperature (°C)
    pub temp_ambient: f64,
    /// Initial terminal voltage; the open circuit voltage when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,
    /// Initial RC branch current (A)
    #[serde(default)]
    pub i_r1: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundsDef {
    pub soc: RangeDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RangeDef {
    pub low: f64,
    pub high: f64,
}

impl Project {
    /// Entries of the given type, in file order.
    pub fn models_of(&self, kind: ModelType) -> impl Iterator<Item = &ModelConfig> {
        self.models.iter().filter(move |m| m.kind == kind)
    }
}
