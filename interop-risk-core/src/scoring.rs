//! Total risk aggregation
//!
//! Combines the three channel risks with the validated weights, then scales
//! by the temporal and equity multipliers.
//!
//! Only implementation risk is re-expressed per unit of exposure before
//! weighting; the opportunity and interaction scores enter the aggregate as
//! computed. The result reports all three channel scores raw.
//!
//! Every reported field is finite: magnitudes that would overflow saturate
//! at `f64::MAX`.

use crate::params::{saturate, validate_parameters, RawParameters, ValidatedParameters, EPS};
use crate::risk::{implementation_risk, interaction_risk, opportunity_risk, OpportunityInputs};
use crate::weights::{equity_weight, temporal_weight};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Names of the result fields, in report order
pub const RESULT_FIELDS: [&str; 6] = ["r_impl", "r_opp", "r_int", "w_temporal", "w_equity", "r_total"];

/// Breakdown of a single evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RiskResult {
    pub r_impl: f64,
    pub r_opp: f64,
    pub r_int: f64,
    pub w_temporal: f64,
    pub w_equity: f64,
    pub r_total: f64,
}

impl RiskResult {
    /// Field name and value pairs, in report order
    pub fn fields(&self) -> [(&'static str, f64); 6] {
        [
            (RESULT_FIELDS[0], self.r_impl),
            (RESULT_FIELDS[1], self.r_opp),
            (RESULT_FIELDS[2], self.r_int),
            (RESULT_FIELDS[3], self.w_temporal),
            (RESULT_FIELDS[4], self.w_equity),
            (RESULT_FIELDS[5], self.r_total),
        ]
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.fields()
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }
}

/// Validate raw parameters and evaluate them
pub fn evaluate(raw: &RawParameters) -> RiskResult {
    let params = validate_parameters(raw);
    evaluate_validated(&params)
}

/// Evaluate already-validated parameters
pub fn evaluate_validated(p: &ValidatedParameters) -> RiskResult {
    let r_impl = implementation_risk(
        p.probability_failure,
        p.impact_severity,
        p.data_volume,
        p.standardization_maturity,
    );
    let r_opp = opportunity_risk(&OpportunityInputs {
        missed_benefits_usd: p.missed_benefits_usd,
        time_delay_months: p.time_delay_months,
        patient_population: p.patient_population,
        current_performance: p.current_performance,
        opp_cap_usd_per_patient: p.opp_cap_usd_per_patient,
    });
    let r_int = interaction_risk(
        p.system_conflicts,
        p.workflow_disruption,
        p.user_confusion,
        p.integration_quality,
    );
    let w_temporal = temporal_weight(p.time_horizon_years, p.discount_rate, p.urgency_factor);
    let w_equity = equity_weight(p.vulnerability_score, p.access_barriers, p.outcome_disparities);

    // r_impl / (data_volume + EPS), per unit of exposure, without forming the
    // product that overflows; bounded by 1 / 0.01
    let exposure_share = p.data_volume / (p.data_volume + EPS);
    let impl_norm =
        p.probability_failure * p.impact_severity / p.standardization_maturity * exposure_share;

    let agg = saturate(p.w_impl * impl_norm + p.w_opp * r_opp + p.w_int * r_int);
    let r_total = saturate(saturate(agg * w_temporal) * w_equity);

    let result = RiskResult {
        r_impl,
        r_opp,
        r_int,
        w_temporal,
        w_equity,
        r_total,
    };
    tracing::debug!(
        r_impl,
        r_opp,
        r_int,
        w_temporal,
        w_equity,
        r_total,
        "evaluated scenario"
    );
    result
}

/// Mapping interface: named parameters in, the six named result fields out
pub fn total_risk(parameters: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    evaluate(&RawParameters::from_map(parameters)).to_map()
}
