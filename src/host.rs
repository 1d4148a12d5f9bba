//! File-backed host inputs: series data and dashboard variables

use anyhow::{Context, Result};
use imageit_core::{Series, TemplateVariables};
use std::path::Path;

/// Load series from a JSON file holding an array of
/// `{"refId": ..., "name": ..., "values": [...]}` objects
pub fn load_series(path: &Path) -> Result<Vec<Series>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let series = serde_json::from_str(&content)
        .with_context(|| format!("Invalid series data in {}", path.display()))?;
    Ok(series)
}

/// Parse a "name=value" variable assignment
pub fn parse_variable(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected format: NAME=VALUE, got: {}", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Variable name missing in: {}", s));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Collect parsed assignments into a variable set; a repeated name keeps
/// its last value
pub fn variables(assignments: &[(String, String)]) -> TemplateVariables {
    let mut vars = TemplateVariables::new();
    for (name, value) in assignments {
        vars.set(name.as_str(), value.as_str());
    }
    vars
}
