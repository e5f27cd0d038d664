//! Battery sub-models: state of charge, equivalent circuit, lumped thermal
//! network and stress-based aging.
//!
//! Every model is a stateless unit struct with associated functions. Each
//! function takes the previous state by reference and returns a new state, so
//! callers can keep old snapshots around for free.

pub mod aging;
pub mod components;
pub mod electrical;
pub mod electrical_fading;
pub mod error;
pub mod rainflow;
pub mod soc;
pub mod thermal;

pub use aging::{BolunDropflowModel, BolunDropflowState, BolunParams, StressModels};
pub use components::{Components, LookupTable, Parameter};
pub use electrical::{ElectricalInit, ElectricalReadout, ElectricalState, TheveninModel, TheveninParams};
pub use electrical_fading::{FadingElectricalState, TheveninFadingModel};
pub use error::{ModelError, ModelResult};
pub use rainflow::{Cycle, DropflowCounter, Reversal};
pub use soc::{SocModel, SocState};
pub use thermal::{R2CParams, R2CThermalModel, ThermalState};
