//! Validated diabetes reading

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::schema::DiabetesRiskInput;
use crate::validator::validate_age;

/// One user's validated diabetes sample
///
/// Constructed only through [`DiabetesReading::from_input`], so a value of
/// this type has already passed boundary validation. Gender is collected for
/// the record but never encoded; the trained schema has no gender column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabetesReading {
    /// Self-reported gender (recorded, not a model feature)
    pub gender: Option<String>,
    /// Age in years
    pub age: f64,
    /// Diagnosed hypertension
    pub hypertension: bool,
    /// Diagnosed heart disease
    pub heart_disease: bool,
    /// Smoking history category as submitted; matched against the schema's
    /// one-hot columns at encoding time
    pub smoking_history: Option<String>,
    /// Body mass index (kg/m²)
    pub bmi: f64,
    /// HbA1c level (%)
    pub hba1c_level: f64,
    /// Blood glucose level (mg/dL)
    pub blood_glucose_level: f64,
    /// When the sample was recorded (UTC)
    pub recorded_at: DateTime<Utc>,
}

impl DiabetesReading {
    /// Validate a raw submission into a reading.
    ///
    /// Age carries a range check and blocks scoring when out of range. The
    /// remaining numerics are required and must be finite but carry no range
    /// check of their own.
    pub fn from_input(input: &DiabetesRiskInput) -> Result<Self, RiskError> {
        let age = require_finite(input.age, "age")?;
        let age = validate_age(age).ok_or_else(|| {
            RiskError::invalid("age", format!("must be between 20 and 100, got {}", age))
        })?;

        let hypertension = input
            .hypertension
            .ok_or_else(|| RiskError::MissingField("hypertension".to_string()))?
            .as_bool();
        let heart_disease = input
            .heart_disease
            .ok_or_else(|| RiskError::MissingField("heart_disease".to_string()))?
            .as_bool();

        Ok(Self {
            gender: input.gender.clone(),
            age,
            hypertension,
            heart_disease,
            smoking_history: input.smoking_history.clone(),
            bmi: require_finite(input.bmi, "bmi")?,
            hba1c_level: require_finite(input.hba1c_level, "hba1c_level")?,
            blood_glucose_level: require_finite(input.blood_glucose_level, "blood_glucose_level")?,
            recorded_at: Utc::now(),
        })
    }
}

fn require_finite(value: Option<f64>, field: &str) -> Result<f64, RiskError> {
    let value = value.ok_or_else(|| RiskError::MissingField(field.to_string()))?;
    if !value.is_finite() {
        return Err(RiskError::invalid(
            field,
            format!("must be a finite number, got {}", value),
        ));
    }
    Ok(value)
}
