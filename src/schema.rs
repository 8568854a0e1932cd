//! Raw scoring-input schemas
//!
//! Explicit, versioned input records for the scoring boundary. Replacing
//! free-form dict payloads with named optional/required fields moves the
//! "missing key" class of failures into the schema layer, where they surface
//! as typed errors instead of faults inside a scoring function.

use serde::{Deserialize, Serialize};

use crate::error::RiskError;

/// Schema identifier for dashboard vitals submissions
pub const VITALS_SCHEMA_VERSION: &str = "health.vitals.v1";
/// Schema identifier for heart-risk scoring inputs
pub const HEART_SCHEMA_VERSION: &str = "health.heart_risk.v1";
/// Schema identifier for diabetes-risk scoring inputs
pub const DIABETES_SCHEMA_VERSION: &str = "health.diabetes_risk.v1";

/// Loose boolean as submitted by form layers: `true`/`false` or `0`/`1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Number(f64),
}

impl Flag {
    pub fn as_bool(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Number(n) => *n != 0.0,
        }
    }
}

/// One vitals submission from the dashboard form
///
/// Every field is optional; a submission carries whatever the user filled in.
/// Validation happens downstream, field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalsInput {
    /// Optional schema tag; checked when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// "systolic/diastolic" string, e.g. "120/80"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    /// Heart rate (bpm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// Body temperature (celsius)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Body weight (kg)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Total cholesterol (mg/dL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
}

impl VitalsInput {
    pub fn from_json(json: &str) -> Result<Self, RiskError> {
        let input: Self = serde_json::from_str(json)?;
        check_version(&input.schema_version, VITALS_SCHEMA_VERSION)?;
        Ok(input)
    }
}

/// Heart-risk scoring input
///
/// One record serves both encoding policies: the strict policy requires
/// age/blood_pressure/cholesterol/heart_rate and validates each, the lenient
/// policy reads blood_pressure/heart_rate/weight with defaults for whatever
/// is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRiskInput {
    /// Optional schema tag; checked when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    /// "systolic/diastolic" string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    /// Total cholesterol (mg/dL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    /// Heart rate (bpm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// ST depression induced by exercise ("oldpeak" in the training data)
    #[serde(alias = "oldpeak", skip_serializing_if = "Option::is_none")]
    pub st_depression: Option<f64>,
    /// Body weight (kg); only the lenient encoding uses it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl HeartRiskInput {
    pub fn from_json(json: &str) -> Result<Self, RiskError> {
        let input: Self = serde_json::from_str(json)?;
        check_version(&input.schema_version, HEART_SCHEMA_VERSION)?;
        Ok(input)
    }
}

/// Diabetes-risk scoring input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiabetesRiskInput {
    /// Optional schema tag; checked when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Gender label; collected for the record, not a model feature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Age in years (required for scoring)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    /// Hypertension diagnosis flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypertension: Option<Flag>,
    /// Heart-disease diagnosis flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_disease: Option<Flag>,
    /// Smoking-history category; the model schema decides which categories
    /// are known, anything else encodes as no category selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoking_history: Option<String>,
    /// Body-mass index
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    /// HbA1c level (%)
    #[serde(alias = "HbA1c_level", skip_serializing_if = "Option::is_none")]
    pub hba1c_level: Option<f64>,
    /// Blood glucose level (mg/dL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_glucose_level: Option<f64>,
}

impl DiabetesRiskInput {
    pub fn from_json(json: &str) -> Result<Self, RiskError> {
        let input: Self = serde_json::from_str(json)?;
        check_version(&input.schema_version, DIABETES_SCHEMA_VERSION)?;
        Ok(input)
    }
}

fn check_version(found: &Option<String>, expected: &str) -> Result<(), RiskError> {
    match found {
        Some(version) if version != expected => Err(RiskError::invalid(
            "schema_version",
            format!("expected {}, got {}", expected, version),
        )),
        _ => Ok(()),
    }
}
