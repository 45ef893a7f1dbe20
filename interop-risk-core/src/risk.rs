//! Per-channel deployment risk
//!
//! Global invariants enforced:
//! - Pure functions of their arguments
//! - No division by an unguarded denominator
//! - Finite, non-negative inputs give a finite result (saturating at f64::MAX)

use crate::params::{
    saturate, DEFAULT_OPP_CAP_USD_PER_PATIENT, EPS, MIN_PATIENT_POPULATION,
    MIN_STANDARDIZATION_MATURITY,
};

/// Channel weights for interaction risk (conflicts, disruption, confusion)
pub const W_SYSTEM_CONFLICTS: f64 = 0.5;
pub const W_WORKFLOW_DISRUPTION: f64 = 0.3;
pub const W_USER_CONFUSION: f64 = 0.2;

/// Calculate implementation risk
///
/// Formula:
/// R_impl = probability_failure * impact_severity * data_volume / standardization_maturity
///
/// Maturity <= 0 is treated as 0.01, so this is safe on unvalidated input.
pub fn implementation_risk(
    probability_failure: f64,
    impact_severity: f64,
    data_volume: f64,
    standardization_maturity: f64,
) -> f64 {
    let maturity = if standardization_maturity <= 0.0 {
        MIN_STANDARDIZATION_MATURITY
    } else {
        standardization_maturity
    };
    saturate(probability_failure * impact_severity * data_volume / maturity)
}

/// Input for opportunity risk computation
#[derive(Debug, Clone, PartialEq)]
pub struct OpportunityInputs {
    pub missed_benefits_usd: f64,
    pub time_delay_months: f64,
    pub patient_population: f64,
    pub current_performance: f64,
    pub opp_cap_usd_per_patient: f64,
}

impl Default for OpportunityInputs {
    fn default() -> Self {
        OpportunityInputs {
            missed_benefits_usd: 0.0,
            time_delay_months: 0.0,
            patient_population: MIN_PATIENT_POPULATION,
            current_performance: 0.0,
            opp_cap_usd_per_patient: DEFAULT_OPP_CAP_USD_PER_PATIENT,
        }
    }
}

/// Calculate opportunity risk, normalized against the per-patient cap
///
/// Formula:
/// - per_capita = missed_benefits_usd / max(patient_population, 1)
/// - time_factor = time_delay_months / 12
/// - unmet_need = 1 - current_performance
/// - R_opp = per_capita * time_factor * unmet_need / max(cap, EPS)
///
/// Not clamped: values above 1.0 mean the raw cost exceeds the cap.
pub fn opportunity_risk(inputs: &OpportunityInputs) -> f64 {
    let per_capita = inputs.missed_benefits_usd / inputs.patient_population.max(MIN_PATIENT_POPULATION);
    let time_factor = inputs.time_delay_months / 12.0;
    let unmet_need = 1.0 - inputs.current_performance;

    // USD per patient; each product saturates so a zero factor never meets inf
    let raw = saturate(saturate(per_capita * time_factor) * unmet_need);
    saturate(raw / inputs.opp_cap_usd_per_patient.max(EPS))
}

/// Calculate socio-technical interaction risk
///
/// Formula:
/// - base = 0.5 * system_conflicts + 0.3 * workflow_disruption + 0.2 * user_confusion
/// - R_int = base * (1 - integration_quality)
pub fn interaction_risk(
    system_conflicts: f64,
    workflow_disruption: f64,
    user_confusion: f64,
    integration_quality: f64,
) -> f64 {
    let base = W_SYSTEM_CONFLICTS * system_conflicts
        + W_WORKFLOW_DISRUPTION * workflow_disruption
        + W_USER_CONFUSION * user_confusion;
    base * (1.0 - integration_quality)
}
