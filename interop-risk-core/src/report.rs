//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Fixed field order
//! - Byte-for-byte identical output across runs

use crate::params::ValidatedParameters;
use crate::scoring::RiskResult;
use serde::Serialize;

/// Report wrapper carrying an optional scenario label and description
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub result: &'a RiskResult,
}

/// Render a result as a two-column text table
pub fn render_text(result: &RiskResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<12} {}\n", "COMPONENT", "VALUE"));
    for (name, value) in result.fields() {
        output.push_str(&format!("{:<12} {:.6}\n", name, value));
    }
    output
}

/// Render a labelled result as text
pub fn render_scenario_text(report: &ScenarioReport<'_>) -> String {
    let mut output = String::new();
    if let Some(name) = report.scenario {
        output.push_str(&format!("Scenario: {}\n", name));
    }
    if let Some(description) = report.description {
        output.push_str(&format!("Description: {}\n", description));
    }
    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(&render_text(report.result));
    output
}

/// Render a result as JSON output
pub fn render_json(result: &RiskResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
}

/// Render a labelled result as JSON output
pub fn render_scenario_json(report: &ScenarioReport<'_>) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

/// Render validated parameters as JSON output
pub fn render_validated_json(params: &ValidatedParameters) -> String {
    serde_json::to_string_pretty(params).unwrap_or_else(|_| "{}".to_string())
}
