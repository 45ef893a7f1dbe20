//! Scenario parameters and the parameter validator
//!
//! Global invariants enforced:
//! - Validation never fails; out-of-range values are clamped, not reported
//! - Every ValidatedParameters field lies in its safe domain
//! - No downstream division by zero is possible from ValidatedParameters
//! - Validation is a projection: validating validated parameters is a no-op

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Guard added to denominators that are not otherwise floored
pub const EPS: f64 = 1e-9;

/// Floor for standardization maturity (used as a denominator)
pub const MIN_STANDARDIZATION_MATURITY: f64 = 0.01;

/// Floor for patient population (used as a denominator)
pub const MIN_PATIENT_POPULATION: f64 = 1.0;

/// Per-patient opportunity cost ceiling used when none is supplied
pub const DEFAULT_OPP_CAP_USD_PER_PATIENT: f64 = 10000.0;

/// Urgency used when none is supplied (neutral temporal multiplier)
pub const DEFAULT_URGENCY_FACTOR: f64 = 1.0;

/// Default channel weights (implementation, opportunity, interaction)
pub const DEFAULT_W_IMPL: f64 = 0.4;
pub const DEFAULT_W_OPP: f64 = 0.4;
pub const DEFAULT_W_INT: f64 = 0.2;

/// Fields with an intended domain of [0, 1]
pub const UNIT_INTERVAL_FIELDS: &[&str] = &[
    "probability_failure",
    "impact_severity",
    "current_performance",
    "system_conflicts",
    "workflow_disruption",
    "user_confusion",
    "integration_quality",
    "vulnerability_score",
    "access_barriers",
    "outcome_disparities",
];

/// Fields with an intended domain of [0, inf)
pub const NON_NEGATIVE_FIELDS: &[&str] = &[
    "data_volume",
    "missed_benefits_usd",
    "time_delay_months",
    "patient_population",
    "discount_rate",
    "time_horizon_years",
    "urgency_factor",
    "opp_cap_usd_per_patient",
];

/// Relative weights of the three risk channels
pub const WEIGHT_FIELDS: &[&str] = &["w_impl", "w_opp", "w_int"];

/// Every recognized parameter key, in declaration order
pub const PARAMETER_FIELDS: &[&str] = &[
    "probability_failure",
    "impact_severity",
    "data_volume",
    "standardization_maturity",
    "missed_benefits_usd",
    "time_delay_months",
    "patient_population",
    "current_performance",
    "opp_cap_usd_per_patient",
    "system_conflicts",
    "workflow_disruption",
    "user_confusion",
    "integration_quality",
    "discount_rate",
    "time_horizon_years",
    "urgency_factor",
    "vulnerability_score",
    "access_barriers",
    "outcome_disparities",
    "w_impl",
    "w_opp",
    "w_int",
];

/// Scenario parameters as supplied by the caller
///
/// Every field is optional and unconstrained. `None` means the field was
/// not supplied; the validator decides what an absent field becomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawParameters {
    // Implementation channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability_failure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_severity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standardization_maturity: Option<f64>,

    // Opportunity channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missed_benefits_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_delay_months: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_population: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_performance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opp_cap_usd_per_patient: Option<f64>,

    // Interaction channel
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_conflicts: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_disruption: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_confusion: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_quality: Option<f64>,

    // Temporal weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_horizon_years: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_factor: Option<f64>,

    // Equity weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerability_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_barriers: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_disparities: Option<f64>,

    // Channel weights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w_impl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w_opp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w_int: Option<f64>,
}

impl RawParameters {
    /// Build from the mapping interface. Unrecognized keys are ignored.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Self {
        let mut raw = RawParameters::default();
        for (key, &value) in map {
            if !raw.set(key, value) {
                tracing::trace!(key = key.as_str(), "ignoring unrecognized parameter");
            }
        }
        raw
    }

    /// Set a parameter by key. Returns false if the key is not recognized.
    pub fn set(&mut self, key: &str, value: f64) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    /// Look up a parameter by key
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "probability_failure" => self.probability_failure,
            "impact_severity" => self.impact_severity,
            "data_volume" => self.data_volume,
            "standardization_maturity" => self.standardization_maturity,
            "missed_benefits_usd" => self.missed_benefits_usd,
            "time_delay_months" => self.time_delay_months,
            "patient_population" => self.patient_population,
            "current_performance" => self.current_performance,
            "opp_cap_usd_per_patient" => self.opp_cap_usd_per_patient,
            "system_conflicts" => self.system_conflicts,
            "workflow_disruption" => self.workflow_disruption,
            "user_confusion" => self.user_confusion,
            "integration_quality" => self.integration_quality,
            "discount_rate" => self.discount_rate,
            "time_horizon_years" => self.time_horizon_years,
            "urgency_factor" => self.urgency_factor,
            "vulnerability_score" => self.vulnerability_score,
            "access_barriers" => self.access_barriers,
            "outcome_disparities" => self.outcome_disparities,
            "w_impl" => self.w_impl,
            "w_opp" => self.w_opp,
            "w_int" => self.w_int,
            _ => None,
        }
    }

    /// Merge `other` on top of `self`; fields present in `other` win
    pub fn overlay(&mut self, other: &RawParameters) {
        for key in PARAMETER_FIELDS {
            if let Some(value) = other.get(key) {
                self.set(key, value);
            }
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<f64>> {
        let slot = match key {
            "probability_failure" => &mut self.probability_failure,
            "impact_severity" => &mut self.impact_severity,
            "data_volume" => &mut self.data_volume,
            "standardization_maturity" => &mut self.standardization_maturity,
            "missed_benefits_usd" => &mut self.missed_benefits_usd,
            "time_delay_months" => &mut self.time_delay_months,
            "patient_population" => &mut self.patient_population,
            "current_performance" => &mut self.current_performance,
            "opp_cap_usd_per_patient" => &mut self.opp_cap_usd_per_patient,
            "system_conflicts" => &mut self.system_conflicts,
            "workflow_disruption" => &mut self.workflow_disruption,
            "user_confusion" => &mut self.user_confusion,
            "integration_quality" => &mut self.integration_quality,
            "discount_rate" => &mut self.discount_rate,
            "time_horizon_years" => &mut self.time_horizon_years,
            "urgency_factor" => &mut self.urgency_factor,
            "vulnerability_score" => &mut self.vulnerability_score,
            "access_barriers" => &mut self.access_barriers,
            "outcome_disparities" => &mut self.outcome_disparities,
            "w_impl" => &mut self.w_impl,
            "w_opp" => &mut self.w_opp,
            "w_int" => &mut self.w_int,
            _ => return None,
        };
        Some(slot)
    }
}

/// Scenario parameters after validation
///
/// Every field is concrete and within its safe domain. The three weights
/// sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedParameters {
    pub probability_failure: f64,
    pub impact_severity: f64,
    pub data_volume: f64,
    /// In [0.01, 1.0]
    pub standardization_maturity: f64,

    pub missed_benefits_usd: f64,
    pub time_delay_months: f64,
    /// At least 1.0
    pub patient_population: f64,
    pub current_performance: f64,
    /// Strictly positive
    pub opp_cap_usd_per_patient: f64,
    /// True when the cap was absent or non-positive and the default was used
    pub opp_cap_defaulted: bool,

    pub system_conflicts: f64,
    pub workflow_disruption: f64,
    pub user_confusion: f64,
    pub integration_quality: f64,

    pub discount_rate: f64,
    pub time_horizon_years: f64,
    pub urgency_factor: f64,

    pub vulnerability_score: f64,
    pub access_barriers: f64,
    pub outcome_disparities: f64,

    pub w_impl: f64,
    pub w_opp: f64,
    pub w_int: f64,
}

impl Default for ValidatedParameters {
    fn default() -> Self {
        validate_parameters(&RawParameters::default())
    }
}

impl From<&ValidatedParameters> for RawParameters {
    fn from(p: &ValidatedParameters) -> Self {
        RawParameters {
            probability_failure: Some(p.probability_failure),
            impact_severity: Some(p.impact_severity),
            data_volume: Some(p.data_volume),
            standardization_maturity: Some(p.standardization_maturity),
            missed_benefits_usd: Some(p.missed_benefits_usd),
            time_delay_months: Some(p.time_delay_months),
            patient_population: Some(p.patient_population),
            current_performance: Some(p.current_performance),
            // A defaulted cap stays absent so the flag survives revalidation
            opp_cap_usd_per_patient: (!p.opp_cap_defaulted).then_some(p.opp_cap_usd_per_patient),
            system_conflicts: Some(p.system_conflicts),
            workflow_disruption: Some(p.workflow_disruption),
            user_confusion: Some(p.user_confusion),
            integration_quality: Some(p.integration_quality),
            discount_rate: Some(p.discount_rate),
            time_horizon_years: Some(p.time_horizon_years),
            urgency_factor: Some(p.urgency_factor),
            vulnerability_score: Some(p.vulnerability_score),
            access_barriers: Some(p.access_barriers),
            outcome_disparities: Some(p.outcome_disparities),
            w_impl: Some(p.w_impl),
            w_opp: Some(p.w_opp),
            w_int: Some(p.w_int),
        }
    }
}

/// Restrict `x` to `[lo, hi]`
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(x))
}

/// Cap a magnitude at the largest finite `f64`
pub fn saturate(x: f64) -> f64 {
    x.min(f64::MAX)
}

/// Apply `f` to a present field, logging when the value changes
fn coerce(raw: &mut RawParameters, key: &str, f: impl Fn(f64) -> f64) {
    if let Some(slot) = raw.slot_mut(key) {
        if let Some(value) = *slot {
            let coerced = f(value);
            if coerced != value {
                tracing::debug!(field = key, supplied = value, coerced, "clamped parameter");
            }
            *slot = Some(coerced);
        }
    }
}

/// Validate and coerce raw parameters into their safe domains
///
/// Steps, in order:
/// 1. NaN values are discarded (treated as absent)
/// 2. Unit-interval fields are clamped to [0, 1]
/// 3. Non-negative fields are clamped to [0, f64::MAX]
/// 4. Maturity is floored to 0.01 (absent or <= 0) or clamped to [0.01, 1]
/// 5. Population below 1 becomes 1
/// 6. A non-positive or absent opportunity cap becomes 10000
/// 7. Weights are clamped to [0, 1] and normalized to sum to 1, falling
///    back to 0.4 / 0.4 / 0.2 when their sum is not positive
///
/// Remaining absent fields take their documented defaults.
pub fn validate_parameters(raw: &RawParameters) -> ValidatedParameters {
    let mut q = raw.clone();

    for key in PARAMETER_FIELDS {
        if let Some(slot) = q.slot_mut(key) {
            if let Some(value) = *slot {
                if value.is_nan() {
                    tracing::warn!(field = *key, "discarding NaN parameter");
                    *slot = None;
                }
            }
        }
    }

    for key in UNIT_INTERVAL_FIELDS {
        coerce(&mut q, key, |v| clamp(v, 0.0, 1.0));
    }
    for key in NON_NEGATIVE_FIELDS {
        coerce(&mut q, key, |v| clamp(v, 0.0, f64::MAX));
    }

    let standardization_maturity = match q.standardization_maturity {
        Some(m) if m > 0.0 => clamp(m, MIN_STANDARDIZATION_MATURITY, 1.0),
        supplied => {
            if supplied.is_some() {
                tracing::debug!(field = "standardization_maturity", "flooring non-positive maturity");
            }
            MIN_STANDARDIZATION_MATURITY
        }
    };

    let patient_population = match q.patient_population {
        Some(n) if n >= MIN_PATIENT_POPULATION => n,
        _ => MIN_PATIENT_POPULATION,
    };

    let (opp_cap_usd_per_patient, opp_cap_defaulted) = match q.opp_cap_usd_per_patient {
        Some(cap) if cap > 0.0 => (cap, false),
        _ => (DEFAULT_OPP_CAP_USD_PER_PATIENT, true),
    };

    for key in WEIGHT_FIELDS {
        coerce(&mut q, key, |v| clamp(v, 0.0, 1.0));
    }
    let (w_impl, w_opp, w_int) = normalize_weights(
        q.w_impl.unwrap_or(DEFAULT_W_IMPL),
        q.w_opp.unwrap_or(DEFAULT_W_OPP),
        q.w_int.unwrap_or(DEFAULT_W_INT),
    );

    ValidatedParameters {
        probability_failure: q.probability_failure.unwrap_or(0.0),
        impact_severity: q.impact_severity.unwrap_or(0.0),
        data_volume: q.data_volume.unwrap_or(0.0),
        standardization_maturity,
        missed_benefits_usd: q.missed_benefits_usd.unwrap_or(0.0),
        time_delay_months: q.time_delay_months.unwrap_or(0.0),
        patient_population,
        current_performance: q.current_performance.unwrap_or(0.0),
        opp_cap_usd_per_patient,
        opp_cap_defaulted,
        system_conflicts: q.system_conflicts.unwrap_or(0.0),
        workflow_disruption: q.workflow_disruption.unwrap_or(0.0),
        user_confusion: q.user_confusion.unwrap_or(0.0),
        integration_quality: q.integration_quality.unwrap_or(0.0),
        discount_rate: q.discount_rate.unwrap_or(0.0),
        time_horizon_years: q.time_horizon_years.unwrap_or(0.0),
        urgency_factor: q.urgency_factor.unwrap_or(DEFAULT_URGENCY_FACTOR),
        vulnerability_score: q.vulnerability_score.unwrap_or(0.0),
        access_barriers: q.access_barriers.unwrap_or(0.0),
        outcome_disparities: q.outcome_disparities.unwrap_or(0.0),
        w_impl,
        w_opp,
        w_int,
    }
}

/// Normalize three non-negative weights to sum to 1
///
/// A non-positive sum resets to the defaults exactly.
pub fn normalize_weights(w_impl: f64, w_opp: f64, w_int: f64) -> (f64, f64, f64) {
    let total = w_impl + w_opp + w_int;
    if total <= 0.0 {
        tracing::debug!(total, "weights sum to zero, using defaults");
        (DEFAULT_W_IMPL, DEFAULT_W_OPP, DEFAULT_W_INT)
    } else {
        (w_impl / total, w_opp / total, w_int / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_sum(p: &ValidatedParameters) -> f64 {
        p.w_impl + p.w_opp + p.w_int
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(2.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn test_parameter_bounds_validation() {
        let raw = RawParameters {
            probability_failure: Some(2.0),
            impact_severity: Some(-1.0),
            standardization_maturity: Some(0.0),
            patient_population: Some(0.0),
            w_impl: Some(2.0),
            w_opp: Some(2.0),
            w_int: Some(2.0),
            ..Default::default()
        };
        let p = validate_parameters(&raw);

        assert_eq!(p.probability_failure, 1.0);
        assert_eq!(p.impact_severity, 0.0);
        assert_eq!(p.standardization_maturity, 0.01);
        assert_eq!(p.patient_population, 1.0);
        assert!((weight_sum(&p) - 1.0).abs() < 1e-9);
        // Each weight clamps to 1.0, so they share equally
        assert!((p.w_impl - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_maturity_clamped_into_range() {
        let mut raw = RawParameters::default();
        raw.standardization_maturity = Some(5.0);
        assert_eq!(validate_parameters(&raw).standardization_maturity, 1.0);

        raw.standardization_maturity = Some(0.001);
        assert_eq!(validate_parameters(&raw).standardization_maturity, 0.01);

        raw.standardization_maturity = Some(-3.0);
        assert_eq!(validate_parameters(&raw).standardization_maturity, 0.01);

        raw.standardization_maturity = None;
        assert_eq!(validate_parameters(&raw).standardization_maturity, 0.01);
    }

    #[test]
    fn test_population_floor() {
        let mut raw = RawParameters::default();
        raw.patient_population = Some(0.5);
        assert_eq!(validate_parameters(&raw).patient_population, 1.0);

        raw.patient_population = Some(-100.0);
        assert_eq!(validate_parameters(&raw).patient_population, 1.0);

        raw.patient_population = Some(2500.0);
        assert_eq!(validate_parameters(&raw).patient_population, 2500.0);
    }

    #[test]
    fn test_opp_cap_default() {
        let mut raw = RawParameters::default();
        let p = validate_parameters(&raw);
        assert_eq!(p.opp_cap_usd_per_patient, 10000.0);
        assert!(p.opp_cap_defaulted);

        raw.opp_cap_usd_per_patient = Some(-5.0);
        let p = validate_parameters(&raw);
        assert_eq!(p.opp_cap_usd_per_patient, 10000.0);
        assert!(p.opp_cap_defaulted);

        raw.opp_cap_usd_per_patient = Some(250.0);
        let p = validate_parameters(&raw);
        assert_eq!(p.opp_cap_usd_per_patient, 250.0);
        assert!(!p.opp_cap_defaulted);
    }

    #[test]
    fn test_non_negative_fields_floored() {
        let raw = RawParameters {
            data_volume: Some(-10.0),
            missed_benefits_usd: Some(-1.0),
            time_delay_months: Some(-6.0),
            discount_rate: Some(-0.05),
            time_horizon_years: Some(-2.0),
            urgency_factor: Some(-1.0),
            ..Default::default()
        };
        let p = validate_parameters(&raw);
        assert_eq!(p.data_volume, 0.0);
        assert_eq!(p.missed_benefits_usd, 0.0);
        assert_eq!(p.time_delay_months, 0.0);
        assert_eq!(p.discount_rate, 0.0);
        assert_eq!(p.time_horizon_years, 0.0);
        assert_eq!(p.urgency_factor, 0.0);
    }

    #[test]
    fn test_zero_weights_fall_back_to_defaults() {
        let raw = RawParameters {
            w_impl: Some(0.0),
            w_opp: Some(-1.0),
            w_int: Some(-0.5),
            ..Default::default()
        };
        let p = validate_parameters(&raw);
        assert_eq!((p.w_impl, p.w_opp, p.w_int), (0.4, 0.4, 0.2));
    }

    #[test]
    fn test_absent_weights_take_defaults_before_normalizing() {
        let raw = RawParameters {
            w_impl: Some(1.0),
            ..Default::default()
        };
        let p = validate_parameters(&raw);
        assert!((p.w_impl - 1.0 / 1.6).abs() < 1e-12);
        assert!((p.w_opp - 0.4 / 1.6).abs() < 1e-12);
        assert!((p.w_int - 0.2 / 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_absent_fields_take_defaults() {
        let p = validate_parameters(&RawParameters::default());
        assert_eq!(p.probability_failure, 0.0);
        assert_eq!(p.data_volume, 0.0);
        assert_eq!(p.urgency_factor, 1.0);
        assert_eq!((p.w_impl, p.w_opp, p.w_int), (0.4, 0.4, 0.2));
    }

    #[test]
    fn test_nan_values_treated_as_absent() {
        let raw = RawParameters {
            data_volume: Some(f64::NAN),
            probability_failure: Some(f64::NAN),
            urgency_factor: Some(f64::NAN),
            w_impl: Some(f64::NAN),
            ..Default::default()
        };
        let p = validate_parameters(&raw);
        assert_eq!(p.data_volume, 0.0);
        assert_eq!(p.probability_failure, 0.0);
        assert_eq!(p.urgency_factor, 1.0);
        assert!((p.w_impl - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_infinite_values_clamp_to_bounds() {
        let raw = RawParameters {
            probability_failure: Some(f64::INFINITY),
            impact_severity: Some(f64::NEG_INFINITY),
            data_volume: Some(f64::INFINITY),
            missed_benefits_usd: Some(f64::NEG_INFINITY),
            standardization_maturity: Some(f64::INFINITY),
            patient_population: Some(f64::INFINITY),
            opp_cap_usd_per_patient: Some(f64::INFINITY),
            w_impl: Some(f64::INFINITY),
            w_opp: Some(0.0),
            w_int: Some(0.0),
            ..Default::default()
        };
        let p = validate_parameters(&raw);
        assert_eq!(p.probability_failure, 1.0);
        assert_eq!(p.impact_severity, 0.0);
        assert_eq!(p.data_volume, f64::MAX);
        assert_eq!(p.missed_benefits_usd, 0.0);
        assert_eq!(p.standardization_maturity, 1.0);
        assert_eq!(p.patient_population, f64::MAX);
        assert_eq!(p.opp_cap_usd_per_patient, f64::MAX);
        assert!(!p.opp_cap_defaulted);
        assert_eq!((p.w_impl, p.w_opp, p.w_int), (1.0, 0.0, 0.0));
    }

    #[test]
    fn test_negative_infinite_weight_clamps_to_zero() {
        let raw = RawParameters {
            w_impl: Some(f64::NEG_INFINITY),
            w_opp: Some(0.5),
            w_int: Some(0.5),
            ..Default::default()
        };
        let p = validate_parameters(&raw);
        assert_eq!((p.w_impl, p.w_opp, p.w_int), (0.0, 0.5, 0.5));

        let raw = RawParameters {
            standardization_maturity: Some(f64::NEG_INFINITY),
            ..Default::default()
        };
        assert_eq!(validate_parameters(&raw).standardization_maturity, 0.01);
    }

    #[test]
    fn test_validation_does_not_mutate_input() {
        let raw = RawParameters {
            probability_failure: Some(3.0),
            ..Default::default()
        };
        let before = raw.clone();
        let _ = validate_parameters(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn test_from_map_ignores_unknown_keys() {
        let mut map = BTreeMap::new();
        map.insert("probability_failure".to_string(), 0.3);
        map.insert("not_a_parameter".to_string(), 9.0);
        let raw = RawParameters::from_map(&map);
        assert_eq!(raw.probability_failure, Some(0.3));
        assert_eq!(raw.get("not_a_parameter"), None);
    }

    #[test]
    fn test_set_and_get_cover_every_field() {
        let mut raw = RawParameters::default();
        for (i, key) in PARAMETER_FIELDS.iter().enumerate() {
            assert!(raw.set(key, i as f64), "{} should be settable", key);
        }
        for (i, key) in PARAMETER_FIELDS.iter().enumerate() {
            assert_eq!(raw.get(key), Some(i as f64));
        }
        assert!(!raw.set("bogus", 1.0));
    }

    #[test]
    fn test_overlay_prefers_other() {
        let mut base = RawParameters {
            probability_failure: Some(0.1),
            impact_severity: Some(0.2),
            ..Default::default()
        };
        let over = RawParameters {
            impact_severity: Some(0.9),
            ..Default::default()
        };
        base.overlay(&over);
        assert_eq!(base.probability_failure, Some(0.1));
        assert_eq!(base.impact_severity, Some(0.9));
    }

    #[test]
    fn test_revalidation_is_stable() {
        let raw = RawParameters {
            probability_failure: Some(1.7),
            standardization_maturity: Some(-1.0),
            patient_population: Some(0.0),
            w_impl: Some(0.7),
            w_opp: Some(0.9),
            w_int: Some(0.3),
            ..Default::default()
        };
        let once = validate_parameters(&raw);
        let twice = validate_parameters(&RawParameters::from(&once));
        assert_eq!(once.opp_cap_defaulted, twice.opp_cap_defaulted);
        assert_eq!(once.opp_cap_usd_per_patient, twice.opp_cap_usd_per_patient);
        assert_eq!(once.probability_failure, twice.probability_failure);
        assert_eq!(once.standardization_maturity, twice.standardization_maturity);
        assert_eq!(once.patient_population, twice.patient_population);
        assert!((once.w_impl - twice.w_impl).abs() < 1e-12);
        assert!((once.w_opp - twice.w_opp).abs() < 1e-12);
        assert!((once.w_int - twice.w_int).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<RawParameters, _> = serde_json::from_str(r#"{"probabilty_failure": 0.1}"#);
        assert!(result.is_err(), "misspelled keys should be rejected");
    }
}
