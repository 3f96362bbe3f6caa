//! vg-scenario: scenario file format and replay for the virus genealogy.

pub mod runner;
pub mod schema;
pub mod strain;
pub mod validate;

use std::path::Path;

pub use runner::{Outcome, ScenarioReport, StepReport, VirusEntry, run};
pub use schema::*;
pub use strain::Strain;
pub use validate::{ValidationError, validate_scenario};

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Genealogy error: {0}")]
    Genealogy(#[from] vg_core::VgError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ScenarioResult<Scenario> {
    let scenario: Scenario = serde_yaml::from_str(content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn load_yaml(path: &Path) -> ScenarioResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn load_json(path: &Path) -> ScenarioResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let scenario: Scenario = serde_json::from_str(&content)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

/// Load a scenario, picking the format from the file extension (YAML unless `.json`).
pub fn load(path: &Path) -> ScenarioResult<Scenario> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

pub fn save_yaml(path: &Path, scenario: &Scenario) -> ScenarioResult<()> {
    validate_scenario(scenario)?;
    let content = serde_yaml::to_string(scenario)?;
    std::fs::write(path, content)?;
    Ok(())
}
