//! Data validation utilities.

use std::path::Path;

use wargame_core::data::UnitDefaults;

use crate::scenario::{Scenario, ScenarioError};

/// Kind of data file, chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFile {
    /// A scenario.
    Scenario,
    /// A unit defaults table.
    UnitDefaults,
}

/// Validate a RON data file.
///
/// Scenarios are parsed and deployed without running their actions, so
/// unknown names, duplicate names and illegal starting equipment are caught.
///
/// # Errors
///
/// Returns an error if the file fails to load, parse or deploy.
pub fn validate_file(path: &Path, kind: DataFile) -> Result<(), ScenarioError> {
    match kind {
        DataFile::Scenario => {
            let scenario = Scenario::load(path)?;
            let deployment = scenario.build(None)?;
            tracing::info!(
                scenario = %scenario.name,
                entities = deployment.names().len(),
                actions = scenario.actions.len(),
                "Scenario is valid"
            );
        }
        DataFile::UnitDefaults => {
            let defaults = UnitDefaults::load(path)?;
            tracing::info!(?defaults, "Unit defaults are valid");
        }
    }
    Ok(())
}
