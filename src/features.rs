//! Feature encoding
//!
//! This module turns validated heart inputs into ordered feature vectors:
//! - Strict encoding for the frozen heart model (5 clinical columns)
//! - Lenient encoding for the simple vitals schema (defaults, never fails)
//!
//! Column order is part of each model's contract; encoders emit columns in
//! the exact order the model was trained on.

use std::ops::RangeInclusive;

use crate::error::RiskError;
use crate::schema::HeartRiskInput;
use crate::types::{BloodPressure, FeatureVector};
use crate::validator::{
    parse_blood_pressure, validate_blood_pressure, AGE_RANGE, CHOLESTEROL_RANGE,
};

/// Training column order of the frozen heart model
pub const HEART_COLUMNS: [&str; 5] = ["age", "trestbps", "chol", "thalach", "oldpeak"];

/// Column order of the lenient simple-vitals encoding
pub const SIMPLE_COLUMNS: [&str; 4] = ["systolic", "diastolic", "heart_rate", "weight"];

/// Systolic range accepted by the strict heart encoding (mmHg). Tighter than
/// the intake range: the training data had nothing below 80.
pub const MODEL_SYSTOLIC_RANGE: RangeInclusive<f64> = 80.0..=200.0;

/// Heart rate range accepted by the strict heart encoding (bpm)
pub const MODEL_HEART_RATE_RANGE: RangeInclusive<f64> = 40.0..=200.0;

/// ST depression range accepted by the strict heart encoding (mm)
pub const ST_DEPRESSION_RANGE: RangeInclusive<f64> = 0.0..=6.0;

/// Substituted when the lenient encoding has no usable blood pressure
pub const DEFAULT_BLOOD_PRESSURE: (i32, i32) = (120, 80);

/// Substituted when the lenient encoding has no usable heart rate (bpm)
pub const DEFAULT_HEART_RATE: f64 = 70.0;

/// Substituted when the lenient encoding has no usable weight (kg)
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// How an encoder treats missing or out-of-range fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingPolicy {
    /// Every field required and range-checked; any defect is an error
    Strict,
    /// Absent or malformed fields fall back to population defaults;
    /// values are never range-checked
    Lenient,
}

/// Encoder from heart inputs to model-ready feature vectors
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Encode a heart input under the given policy.
    pub fn encode_heart(
        input: &HeartRiskInput,
        policy: EncodingPolicy,
    ) -> Result<FeatureVector, RiskError> {
        match policy {
            EncodingPolicy::Strict => encode_strict(input),
            EncodingPolicy::Lenient => encode_lenient(input),
        }
    }
}

pub fn heart_columns() -> Vec<String> {
    HEART_COLUMNS.iter().map(|c| c.to_string()).collect()
}

pub fn simple_columns() -> Vec<String> {
    SIMPLE_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Strict encoding: [age, trestbps, chol, thalach, oldpeak].
///
/// `trestbps` is the systolic half of the blood pressure reading; `thalach`
/// is the measured heart rate; `oldpeak` is ST depression. Every field is
/// required except `oldpeak`, which encodes as 0 when absent.
fn encode_strict(input: &HeartRiskInput) -> Result<FeatureVector, RiskError> {
    let age = check_range(require(input.age, "age")?, &AGE_RANGE, "age")?;

    let raw_bp = input
        .blood_pressure
        .as_deref()
        .ok_or_else(|| RiskError::MissingField("blood_pressure".to_string()))?;
    let bp = validate_blood_pressure(raw_bp).ok_or_else(|| {
        RiskError::invalid(
            "blood_pressure",
            format!("expected \"systolic/diastolic\" within range, got {:?}", raw_bp),
        )
    })?;
    let systolic = check_range(bp.systolic as f64, &MODEL_SYSTOLIC_RANGE, "blood_pressure")?;

    let cholesterol = check_range(
        require(input.cholesterol, "cholesterol")?,
        &CHOLESTEROL_RANGE,
        "cholesterol",
    )?;
    let heart_rate = check_range(
        require(input.heart_rate, "heart_rate")?,
        &MODEL_HEART_RATE_RANGE,
        "heart_rate",
    )?;
    let st_depression = check_range(
        input.st_depression.unwrap_or(0.0),
        &ST_DEPRESSION_RANGE,
        "st_depression",
    )?;

    FeatureVector::new(
        heart_columns(),
        vec![age, systolic, cholesterol, heart_rate, st_depression],
    )
}

/// Lenient encoding: [systolic, diastolic, heart_rate, weight].
///
/// Total over its input: anything missing or malformed (unparseable blood
/// pressure, non-finite numbers) is replaced with a population default
/// instead of failing. Values are never range-checked; an out-of-range
/// reading encodes as given.
fn encode_lenient(input: &HeartRiskInput) -> Result<FeatureVector, RiskError> {
    let bp = input
        .blood_pressure
        .as_deref()
        .and_then(parse_blood_pressure)
        .unwrap_or_else(|| {
            BloodPressure::new(DEFAULT_BLOOD_PRESSURE.0, DEFAULT_BLOOD_PRESSURE.1)
        });
    let heart_rate = input
        .heart_rate
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_HEART_RATE);
    let weight = input
        .weight
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_WEIGHT_KG);

    FeatureVector::new(
        simple_columns(),
        vec![bp.systolic as f64, bp.diastolic as f64, heart_rate, weight],
    )
}

fn require(value: Option<f64>, field: &str) -> Result<f64, RiskError> {
    value.ok_or_else(|| RiskError::MissingField(field.to_string()))
}

fn check_range(
    value: f64,
    range: &RangeInclusive<f64>,
    field: &str,
) -> Result<f64, RiskError> {
    if value.is_finite() && range.contains(&value) {
        Ok(value)
    } else {
        Err(RiskError::invalid(
            field,
            format!(
                "must be between {} and {}, got {}",
                range.start(),
                range.end(),
                value
            ),
        ))
    }
}
