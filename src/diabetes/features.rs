//! Diabetes feature encoding
//!
//! Encoding is a reindex against the frozen model's column schema: each
//! schema column is looked up in the reading, one-hot smoking columns are
//! matched by category, and anything absent encodes as 0. The schema drives
//! the column order, so the emitted vector always matches training order.

use crate::diabetes::types::DiabetesReading;
use crate::error::RiskError;
use crate::model::FeatureSchema;
use crate::types::FeatureVector;

/// Prefix of the one-hot smoking-history columns in the trained schema
pub const SMOKING_COLUMN_PREFIX: &str = "smoking_";

/// Encode a validated reading against a frozen schema.
///
/// Total over valid readings: an unseen or missing smoking category leaves
/// every one-hot column at 0, and a schema column with no counterpart in the
/// reading encodes as 0 rather than failing.
pub fn encode_diabetes_reading(
    reading: &DiabetesReading,
    schema: &FeatureSchema,
) -> Result<FeatureVector, RiskError> {
    let mut values = Vec::with_capacity(schema.len());

    for column in schema.columns() {
        let value = if let Some(category) = column.strip_prefix(SMOKING_COLUMN_PREFIX) {
            match reading.smoking_history.as_deref() {
                Some(observed) if observed == category => 1.0,
                _ => 0.0,
            }
        } else {
            match column.as_str() {
                "age" => reading.age,
                "bmi" => reading.bmi,
                "HbA1c_level" => reading.hba1c_level,
                "blood_glucose_level" => reading.blood_glucose_level,
                "hypertension" => bool_feature(reading.hypertension),
                "heart_disease" => bool_feature(reading.heart_disease),
                other => {
                    tracing::warn!(column = other, "schema column has no reading field, encoding as 0");
                    0.0
                }
            }
        };
        values.push(value);
    }

    FeatureVector::new(schema.columns().to_vec(), values)
}

fn bool_feature(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn make_schema() -> FeatureSchema {
        FeatureSchema::new(
            [
                "age",
                "bmi",
                "HbA1c_level",
                "blood_glucose_level",
                "hypertension",
                "heart_disease",
                "smoking_No Info",
                "smoking_current",
                "smoking_ever",
                "smoking_former",
                "smoking_never",
                "smoking_not current",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        )
    }

    fn make_reading(smoking: Option<&str>) -> DiabetesReading {
        DiabetesReading {
            gender: Some("Male".to_string()),
            age: 48.0,
            hypertension: true,
            heart_disease: false,
            smoking_history: smoking.map(|s| s.to_string()),
            bmi: 29.4,
            hba1c_level: 6.2,
            blood_glucose_level: 145.0,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_encoding_follows_schema_order() {
        let features = encode_diabetes_reading(&make_reading(Some("former")), &make_schema()).unwrap();

        assert_eq!(features.columns(), make_schema().columns());
        assert_eq!(
            features.values(),
            &[48.0, 29.4, 6.2, 145.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_exactly_one_smoking_column_is_hot() {
        let schema = make_schema();
        let features = encode_diabetes_reading(&make_reading(Some("never")), &schema).unwrap();

        let hot: f64 = schema
            .columns()
            .iter()
            .zip(features.values())
            .filter(|(column, _)| column.starts_with(SMOKING_COLUMN_PREFIX))
            .map(|(_, value)| value)
            .sum();
        assert_eq!(hot, 1.0);
    }

    #[test]
    fn test_unseen_smoking_category_encodes_all_zero() {
        let schema = make_schema();
        let features = encode_diabetes_reading(&make_reading(Some("vaper")), &schema).unwrap();

        let hot: f64 = schema
            .columns()
            .iter()
            .zip(features.values())
            .filter(|(column, _)| column.starts_with(SMOKING_COLUMN_PREFIX))
            .map(|(_, value)| value)
            .sum();
        assert_eq!(hot, 0.0);
    }

    #[test]
    fn test_missing_smoking_history_encodes_all_zero() {
        let schema = make_schema();
        let features = encode_diabetes_reading(&make_reading(None), &schema).unwrap();

        assert!(features
            .values()
            .iter()
            .skip(6)
            .all(|value| *value == 0.0));
    }

    #[test]
    fn test_unknown_schema_column_fills_zero() {
        let schema = FeatureSchema::new(vec!["age".to_string(), "insulin".to_string()]);
        let features = encode_diabetes_reading(&make_reading(None), &schema).unwrap();

        assert_eq!(features.values(), &[48.0, 0.0]);
    }

    #[test]
    fn test_column_order_survives_schema_permutation() {
        // A schema stored in a different order must be reproduced as-is.
        let permuted = FeatureSchema::new(
            ["blood_glucose_level", "smoking_former", "age"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        );
        let features = encode_diabetes_reading(&make_reading(Some("former")), &permuted).unwrap();

        assert_eq!(features.columns(), permuted.columns());
        assert_eq!(features.values(), &[145.0, 1.0, 48.0]);
    }
}
