//! Interop-risk core library - deployment risk scoring for healthcare AI
//! and interoperability systems

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Every evaluation is a pure function of its parameters
// - No global mutable state
// - No randomness, clocks, threads, or async
// - Scoring never fails: out-of-range input is clamped, never reported
// - Every result field is finite; overflowing magnitudes saturate at f64::MAX

pub mod config;
pub mod params;
pub mod report;
pub mod risk;
pub mod scoring;
pub mod weights;

pub use config::{load_and_resolve, parse_override, ResolvedScenario, ScenarioConfig};
pub use params::{validate_parameters, RawParameters, ValidatedParameters};
pub use report::{render_json, render_text, ScenarioReport};
pub use scoring::{evaluate, evaluate_validated, total_risk, RiskResult};
