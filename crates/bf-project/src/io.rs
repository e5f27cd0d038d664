//! Reading and writing project files.

use crate::schema::Project;
use crate::validate::validate_project;
use crate::{ProjectError, ProjectResult};
use std::path::Path;

/// On-disk encoding of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// `.json` is JSON, anything else YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }

    pub fn parse(self, content: &str) -> ProjectResult<Project> {
        let project: Project = match self {
            Format::Yaml => serde_yaml::from_str(content)?,
            Format::Json => serde_json::from_str(content)?,
        };
        validate_project(&project)?;
        Ok(project)
    }

    pub fn render(self, project: &Project) -> ProjectResult<String> {
        validate_project(project)?;
        Ok(match self {
            Format::Yaml => serde_yaml::to_string(project)?,
            Format::Json => serde_json::to_string_pretty(project)?,
        })
    }
}

fn read(path: &Path) -> ProjectResult<String> {
    std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: String) -> ProjectResult<()> {
    std::fs::write(path, content).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn from_yaml_str(content: &str) -> ProjectResult<Project> {
    Format::Yaml.parse(content)
}

/// Load a project, picking the format from the file extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    Format::from_path(path).parse(&read(path)?)
}

/// Save a project, picking the format from the file extension.
pub fn save(path: &Path, project: &Project) -> ProjectResult<()> {
    write(path, Format::from_path(path).render(project)?)
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    Format::Yaml.parse(&read(path)?)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    write(path, Format::Yaml.render(project)?)
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    Format::Json.parse(&read(path)?)
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    write(path, Format::Json.render(project)?)
}
