//! Variant selected at runtime from a project file.

use crate::bess::Bess;
use crate::error::SimResult;
use crate::runner::{RunOptions, run_profile};
use crate::state::{BessState, Readout};
use crate::{Dropflow, Fading};
use bf_core::Real;
use bf_project::{Project, VariantKind};

/// Battery state of either variant.
///
/// The variant is fixed by the project; `run` dispatches once and then drives
/// the monomorphic orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyBessState {
    Fading(BessState<Fading>),
    Dropflow(BessState<Dropflow>),
}

impl AnyBessState {
    pub fn from_project(project: &Project) -> SimResult<Self> {
        let models = &project.models;
        let options = &project.battery;
        let input_var = project.input_var.as_str();
        Ok(match project.variant {
            VariantKind::Fading => {
                Self::Fading(Bess::<Fading>::get_init_state(models, options, input_var)?)
            }
            VariantKind::DegradingDropflow => Self::Dropflow(Bess::<Dropflow>::get_init_state_every(
                models,
                options,
                input_var,
                project.check_soh_every,
            )?),
        })
    }

    pub fn step(&self, i: Real, dt: Real, t_amb: Real) -> Self {
        match self {
            Self::Fading(s) => Self::Fading(Bess::step(s, i, dt, t_amb)),
            Self::Dropflow(s) => Self::Dropflow(Bess::step(s, i, dt, t_amb)),
        }
    }

    pub fn get_feasible_current(&self, soc: Real, dt: Real) -> (Real, Real) {
        match self {
            Self::Fading(s) => Bess::get_feasible_current(s, soc, dt),
            Self::Dropflow(s) => Bess::get_feasible_current(s, soc, dt),
        }
    }

    pub fn get_feasible_power(&self, soc: Real, dt: Real) -> (Real, Real) {
        match self {
            Self::Fading(s) => Bess::get_feasible_power(s, soc, dt),
            Self::Dropflow(s) => Bess::get_feasible_power(s, soc, dt),
        }
    }

    pub fn readout(&self) -> Readout {
        match self {
            Self::Fading(s) => s.readout(),
            Self::Dropflow(s) => s.readout(),
        }
    }

    /// Run a current profile and return the recorded readouts.
    pub fn run(&self, currents: &[Real], opts: &RunOptions) -> SimResult<Vec<Readout>> {
        let record = match self {
            Self::Fading(s) => run_profile(s, currents, opts)?.readouts(),
            Self::Dropflow(s) => run_profile(s, currents, opts)?.readouts(),
        };
        Ok(record)
    }
}
