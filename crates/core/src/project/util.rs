use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{departments_from_value, roster_from_value, Department, Roster};
use crate::project::{BuildConfig, ProjectLayout};

/// Load the build config for a layout: `powermap.json` first, then
/// `powermap.yaml`, otherwise defaults. The result is validated.
pub fn load_build_config(layout: &ProjectLayout) -> Result<BuildConfig> {
    let config: BuildConfig = if layout.config_json_path.is_file() {
        let body = std::fs::read_to_string(&layout.config_json_path).with_context(|| {
            format!("Failed to read build config at {}", layout.config_json_path.display())
        })?;
        serde_json::from_str(&body).context("Failed to parse build config JSON")?
    } else if layout.config_yaml_path.is_file() {
        let body = std::fs::read_to_string(&layout.config_yaml_path).with_context(|| {
            format!("Failed to read build config at {}", layout.config_yaml_path.display())
        })?;
        serde_yaml::from_str(&body).context("Failed to parse build config YAML")?
    } else {
        BuildConfig::default()
    };
    config.validate().context("Invalid build config")?;
    Ok(config)
}

fn read_json_value(path: &Path, what: &str) -> Result<serde_json::Value> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} at {}", path.display()))?;
    serde_json::from_str(&body).with_context(|| format!("Failed to parse {what} JSON"))
}

/// Read an extracted roster document from disk.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let value = read_json_value(path, "roster")?;
    roster_from_value(value)
        .with_context(|| format!("Roster at {} has an unexpected shape", path.display()))
}

/// Read an extracted department list from disk.
pub fn load_departments(path: &Path) -> Result<Vec<Department>> {
    let value = read_json_value(path, "departments")?;
    departments_from_value(value)
        .with_context(|| format!("Departments at {} have an unexpected shape", path.display()))
}
