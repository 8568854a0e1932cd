//! Vital-sign validation
//!
//! Pure parse + range checks for each raw vital, one function per field.
//! Every function returns the typed value or `None`; nothing here raises,
//! logs, or touches shared state. The risk-model call sites apply their own
//! tighter ranges (see `features`); the two range policies are deliberately
//! kept separate rather than unified.

use crate::types::BloodPressure;

/// General intake range for systolic pressure (mmHg)
pub const SYSTOLIC_RANGE: std::ops::RangeInclusive<i32> = 70..=200;
/// General intake range for diastolic pressure (mmHg)
pub const DIASTOLIC_RANGE: std::ops::RangeInclusive<i32> = 40..=130;
/// General intake range for heart rate (bpm)
pub const HEART_RATE_RANGE: std::ops::RangeInclusive<f64> = 30.0..=220.0;
/// Body temperature range (celsius)
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 35.0..=42.0;
/// Body weight range (kg)
pub const WEIGHT_RANGE: std::ops::RangeInclusive<f64> = 20.0..=300.0;
/// Age range accepted by the scoring paths (years)
pub const AGE_RANGE: std::ops::RangeInclusive<f64> = 20.0..=100.0;
/// Cholesterol range on the validated path (mg/dL)
pub const CHOLESTEROL_RANGE: std::ops::RangeInclusive<f64> = 100.0..=600.0;

/// Parse a "systolic/diastolic" string without range checks.
///
/// The input must contain exactly one separator producing two integers.
/// The lenient encoding policy stops here; the intake path layers range
/// checks on top via [`validate_blood_pressure`].
pub fn parse_blood_pressure(raw: &str) -> Option<BloodPressure> {
    let mut parts = raw.split('/');
    let systolic = parts.next()?.trim().parse::<i32>().ok()?;
    let diastolic = parts.next()?.trim().parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(BloodPressure::new(systolic, diastolic))
}

/// Parse and range-check a "systolic/diastolic" string.
///
/// Anything [`parse_blood_pressure`] rejects (missing slash, extra parts,
/// non-numeric halves) is invalid, as is either half outside its range.
pub fn validate_blood_pressure(raw: &str) -> Option<BloodPressure> {
    let bp = parse_blood_pressure(raw)?;
    if !SYSTOLIC_RANGE.contains(&bp.systolic) || !DIASTOLIC_RANGE.contains(&bp.diastolic) {
        return None;
    }
    Some(bp)
}

/// Heart rate in whole beats per minute, general intake range.
/// Fractional readings are invalid here; the model call sites accept them.
pub fn validate_heart_rate(raw: f64) -> Option<f64> {
    if raw.fract() != 0.0 {
        return None;
    }
    in_range(raw, &HEART_RATE_RANGE)
}

/// Body temperature in celsius.
pub fn validate_temperature(raw: f64) -> Option<f64> {
    in_range(raw, &TEMPERATURE_RANGE)
}

/// Body weight in kilograms.
pub fn validate_weight(raw: f64) -> Option<f64> {
    in_range(raw, &WEIGHT_RANGE)
}

/// Age in years. Out-of-range age blocks scoring entirely at the
/// pipeline boundary; it is never clamped into range.
pub fn validate_age(raw: f64) -> Option<f64> {
    in_range(raw, &AGE_RANGE)
}

/// Total cholesterol in mg/dL (validated path only; the lenient encoding
/// policy skips this check).
pub fn validate_cholesterol(raw: f64) -> Option<f64> {
    in_range(raw, &CHOLESTEROL_RANGE)
}

fn in_range(raw: f64, range: &std::ops::RangeInclusive<f64>) -> Option<f64> {
    if raw.is_finite() && range.contains(&raw) {
        Some(raw)
    } else {
        None
    }
}
