//! Core types for the vitalscore pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: parsed readings, fixed-order feature vectors, and risk assessments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RiskError;

/// Parsed blood pressure reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    /// Systolic pressure (mmHg)
    pub systolic: i32,
    /// Diastolic pressure (mmHg)
    pub diastolic: i32,
}

impl BloodPressure {
    pub fn new(systolic: i32, diastolic: i32) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }

    /// Canonical "systolic/diastolic" display form
    pub fn as_string(&self) -> String {
        format!("{}/{}", self.systolic, self.diastolic)
    }
}

impl std::fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// One user's validated vitals sample
///
/// Every measurement is optional because a submission may carry any subset of
/// vitals; a reading is only constructed after each present field has passed
/// validation. Fields that fail validation are rejected, never zeroed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalReading {
    /// Blood pressure (parsed, already range-checked)
    pub blood_pressure: Option<BloodPressure>,
    /// Heart rate (bpm)
    pub heart_rate: Option<f64>,
    /// Body temperature (celsius)
    pub temperature_c: Option<f64>,
    /// Body weight (kg)
    pub weight_kg: Option<f64>,
    /// Total cholesterol (mg/dL)
    pub cholesterol: Option<f64>,
    /// When the sample was recorded (UTC)
    pub recorded_at: DateTime<Utc>,
}

impl VitalReading {
    /// Empty reading at the given instant; fields are filled by the validator.
    pub fn at(recorded_at: DateTime<Utc>) -> Self {
        Self {
            blood_pressure: None,
            heart_rate: None,
            temperature_c: None,
            weight_kg: None,
            cholesterol: None,
            recorded_at,
        }
    }
}

/// Fixed-order numeric feature vector matching a frozen model's schema
///
/// Column order must match the order used when the scaler/classifier were
/// fit, or results are silently wrong. The vector is constructed fresh per
/// prediction and carries its column names so the model can verify the order
/// instead of trusting the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build a vector from parallel columns/values; lengths must match.
    pub fn new(columns: Vec<String>, values: Vec<f64>) -> Result<Self, RiskError> {
        if columns.len() != values.len() {
            return Err(RiskError::Encoding(format!(
                "column/value length mismatch: {} columns, {} values",
                columns.len(),
                values.len()
            )));
        }
        Ok(Self {
            columns,
            values,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Named risk tier mapped from a percentage range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    Increased,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::Increased => "Increased",
            RiskLevel::High => "High",
        }
    }

    /// Advice line shown alongside the tier
    pub fn advice(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Maintain healthy lifestyle",
            RiskLevel::Moderate => "Consider lifestyle improvements",
            RiskLevel::Increased => "Consult healthcare provider",
            RiskLevel::High => "Urgent medical attention recommended",
        }
    }

    /// Tier for an unrounded percentage in [0, 100]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 20.0 {
            RiskLevel::Low
        } else if percentage < 40.0 {
            RiskLevel::Moderate
        } else if percentage < 60.0 {
            RiskLevel::Increased
        } else {
            RiskLevel::High
        }
    }
}

/// Human-facing reading of a raw model probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInterpretation {
    /// Probability expressed as a percentage, rounded to 1 decimal
    pub percentage: f64,
    /// Risk tier
    pub level: RiskLevel,
    /// Advice text for the tier
    pub advice: String,
}

/// Output of one scoring run, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Unique assessment id
    pub id: Uuid,
    /// Tag of the model that produced the score (artifact `model` field)
    pub model: String,
    /// Raw positive-class probability in [0, 1]
    pub probability: f64,
    /// Probability as a percentage, rounded to 1 decimal
    pub percentage: f64,
    /// Risk tier
    pub level: RiskLevel,
    /// Advice text for the tier
    pub advice: String,
    /// True only for the documented 0.0-on-failure fallback; lets an audit
    /// trail distinguish a degraded score from a genuine low-risk result
    pub fallback: bool,
    /// When the assessment was computed (UTC)
    pub created_at: DateTime<Utc>,
}

impl RiskAssessment {
    /// Assessment from a model tag and an interpreted probability.
    pub fn from_interpretation(
        model: impl Into<String>,
        probability: f64,
        interpretation: RiskInterpretation,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: model.into(),
            probability,
            percentage: interpretation.percentage,
            level: interpretation.level,
            advice: interpretation.advice,
            fallback: false,
            created_at: Utc::now(),
        }
    }

    /// The documented zero-score fallback for a failed heart prediction.
    /// Reads as 0.0 / Low to the caller; the `fallback` flag and the audit
    /// log carry the distinction from a genuine low-risk result.
    pub fn fallback_zero(model: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            model: model.into(),
            probability: 0.0,
            percentage: 0.0,
            level: RiskLevel::Low,
            advice: RiskLevel::Low.advice().to_string(),
            fallback: true,
            created_at: Utc::now(),
        }
    }
}
