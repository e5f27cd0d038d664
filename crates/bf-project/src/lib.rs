//! bf-project: battery project files.
//!
//! A project bundles the orchestrator variant, the sub-model list and the
//! battery options. Files are YAML or JSON; both are checked with
//! [`validate_project`] on every load and save.

pub mod io;
pub mod schema;
pub mod validate;

pub use io::{Format, from_yaml_str, load, load_json, load_yaml, save, save_json, save_yaml};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
