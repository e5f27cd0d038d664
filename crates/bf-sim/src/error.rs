//! Error types for battery construction and runs.

use bf_core::BfError;
use bf_models::ModelError;
use bf_project::ModelType;
use thiserror::Error;

/// Errors raised while building a battery or driving a run.
///
/// `step` itself never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Unsupported input variable: {found} (only \"current\" is supported)")]
    UnsupportedInputVar { found: String },

    #[error("{kind} model: expected class {expected}, found {found}")]
    ClassMismatch {
        kind: ModelType,
        expected: &'static str,
        found: String,
    },

    #[error("{kind} model: expected {flag} = {expected}, found {found:?}")]
    CapabilityMismatch {
        kind: ModelType,
        flag: &'static str,
        expected: bool,
        found: Option<bool>,
    },

    #[error("Missing {kind} model")]
    MissingModel { kind: ModelType },

    #[error("Unexpected {kind} model for the {variant} variant")]
    UnexpectedModel {
        kind: ModelType,
        variant: &'static str,
    },

    #[error("Duplicate {kind} model")]
    DuplicateModel { kind: ModelType },

    #[error("{kind} model is missing {field}")]
    MissingField {
        kind: ModelType,
        field: &'static str,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Core error: {0}")]
    Core(#[from] BfError),
}

pub type SimResult<T> = Result<T, SimError>;
