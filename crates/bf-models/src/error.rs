//! Error types for sub-model construction.

use bf_core::BfError;
use thiserror::Error;

/// Errors raised while building a sub-model from its configuration.
///
/// Stepping a model never fails; these only come out of `get_init_state`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Missing component: {name}")]
    MissingComponent { name: String },

    #[error("Component {name} must be a scalar")]
    ExpectedScalar { name: String },

    #[error("Invalid lookup table for {name}: {reason}")]
    InvalidTable { name: String, reason: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error(transparent)]
    Core(#[from] BfError),
}

pub type ModelResult<T> = Result<T, ModelError>;
