//! Battery energy storage system orchestration.
//!
//! Provides:
//! - `BessState`, an immutable snapshot of one battery
//! - `Bess<V>`, the stateless orchestrator for a variant `V`
//! - the `Fading` and `Dropflow` variants
//! - `AnyBessState`, the variant chosen at runtime from a project file
//! - a profile runner and lockstep batch stepping
//!
//! Nothing in `step` validates its inputs: a non-positive `dt` or absurd
//! current produces whatever the arithmetic produces. Configuration is
//! checked once, when the initial state is built.

pub mod any;
pub mod batch;
pub mod bess;
pub mod dropflow;
pub mod error;
pub mod fading;
mod models;
pub mod runner;
pub mod state;

pub use any::AnyBessState;
pub use batch::{feasible_current_batch, step_batch};
pub use bess::{Bess, BessVariant, DropflowBess, FadingBess, VariantParts};
pub use dropflow::{Dropflow, DropflowState};
pub use error::{SimError, SimResult};
pub use fading::Fading;
pub use runner::{RunOptions, SimRecord, run_profile};
pub use state::{BessState, Readout};
