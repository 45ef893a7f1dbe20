//! Temporal and equity multipliers

/// Channel weights for equity amplification
pub const W_VULNERABILITY: f64 = 0.5;
pub const W_ACCESS_BARRIERS: f64 = 0.3;
pub const W_OUTCOME_DISPARITIES: f64 = 0.2;

/// Present-value decay of urgency over the time horizon
///
/// Formula:
/// W_t = urgency_factor / (1 + max(discount_rate, 0)) ^ max(time_horizon_years, 0)
///
/// Negative rate or horizon behave as zero, giving W_t = urgency_factor.
pub fn temporal_weight(time_horizon_years: f64, discount_rate: f64, urgency_factor: f64) -> f64 {
    urgency_factor / (1.0 + discount_rate.max(0.0)).powf(time_horizon_years.max(0.0))
}

/// Equity amplification multiplier, never below 1.0
///
/// Formula:
/// W_e = max(1, 1 + 0.5 * vulnerability + 0.3 * access_barriers + 0.2 * outcome_disparities)
pub fn equity_weight(vulnerability_score: f64, access_barriers: f64, outcome_disparities: f64) -> f64 {
    let ew = 1.0
        + W_VULNERABILITY * vulnerability_score
        + W_ACCESS_BARRIERS * access_barriers
        + W_OUTCOME_DISPARITIES * outcome_disparities;
    ew.max(1.0)
}
