//! Scenario file support
//!
//! Loads a deployment scenario from a JSON file.
//!
//! Search order:
//! 1. Explicit path (--scenario CLI flag)
//! 2. `.interop-risk.json` in the working directory
//! 3. `interop-risk.json` in the working directory
//!
//! All parameters are optional. CLI overrides take precedence over file
//! values. Out-of-range numbers are not configuration errors; they are
//! clamped during validation.

use crate::params::RawParameters;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names searched during discovery, in priority order
pub const SCENARIO_FILE_NAMES: &[&str] = &[".interop-risk.json", "interop-risk.json"];

/// Deployment scenario loaded from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Short label shown in reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-text description of the deployment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Scenario parameters (unknown keys are rejected)
    #[serde(default)]
    pub parameters: RawParameters,
}

/// Scenario with CLI overrides applied
#[derive(Debug, Clone, Default)]
pub struct ResolvedScenario {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parameters: RawParameters,
    /// Path the scenario was loaded from (None if nothing was found)
    pub source_path: Option<PathBuf>,
}

impl ResolvedScenario {
    /// Apply `key=value` overrides on top of the loaded parameters
    pub fn apply_overrides(&mut self, overrides: &[(String, f64)]) -> Result<()> {
        for (key, value) in overrides {
            if !self.parameters.set(key, *value) {
                anyhow::bail!("unknown parameter in override: {}", key);
            }
            tracing::debug!(key = key.as_str(), value = *value, "applied override");
        }
        Ok(())
    }
}

/// Parse a `key=value` override
pub fn parse_override(s: &str) -> Result<(String, f64)> {
    let (key, value) = s
        .split_once('=')
        .with_context(|| format!("override must be KEY=VALUE (got {})", s))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("override has an empty key: {}", s);
    }
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("override value for {} is not a number: {}", key, value))?;
    Ok((key.to_string(), value))
}

/// Load a scenario from an explicit file path
pub fn load_scenario_file(path: &Path) -> Result<ScenarioConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario file: {}", path.display()))?;

    let config: ScenarioConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse scenario file: {}", path.display()))?;

    Ok(config)
}

/// Discover a scenario file in a directory
///
/// Returns `None` if no scenario file is found.
pub fn discover_scenario(dir: &Path) -> Result<Option<(ScenarioConfig, PathBuf)>> {
    for name in SCENARIO_FILE_NAMES {
        let path = dir.join(name);
        if path.exists() {
            let config = load_scenario_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load and resolve a scenario
///
/// If `scenario_path` is provided, loads from that file.
/// Otherwise, discovers a scenario in `dir`.
/// Returns an empty scenario if nothing is found.
pub fn load_and_resolve(dir: &Path, scenario_path: Option<&Path>) -> Result<ResolvedScenario> {
    let (config, source_path) = if let Some(path) = scenario_path {
        let config = load_scenario_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_scenario(dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (ScenarioConfig::default(), None),
        }
    };

    Ok(ResolvedScenario {
        name: config.name,
        description: config.description,
        parameters: config.parameters,
        source_path,
    })
}
