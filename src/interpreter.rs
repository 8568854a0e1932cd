//! Risk interpretation and display-side health math
//!
//! Converts a raw model probability into the human-facing percentage, band,
//! and advice line, and provides the pure helpers shown next to a reading on
//! the dashboard: BMI, BMI category, blood-pressure category.

use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::types::{RiskInterpretation, RiskLevel};

/// Body-mass-index bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Band for a computed BMI value
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

/// Blood-pressure bands, evaluated top to bottom: a reading is classified by
/// the first rule it matches, so a Stage 1 diastolic keeps a high systolic
/// reading in Stage 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodPressureCategory {
    Normal,
    Elevated,
    HypertensionStage1,
    HypertensionStage2,
}

impl BloodPressureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::HypertensionStage1 => "Hypertension Stage 1",
            BloodPressureCategory::HypertensionStage2 => "Hypertension Stage 2",
        }
    }

    pub fn classify(systolic: i32, diastolic: i32) -> Self {
        if systolic < 120 && diastolic < 80 {
            BloodPressureCategory::Normal
        } else if (120..130).contains(&systolic) && diastolic < 80 {
            BloodPressureCategory::Elevated
        } else if (130..140).contains(&systolic) || (80..90).contains(&diastolic) {
            BloodPressureCategory::HypertensionStage1
        } else {
            BloodPressureCategory::HypertensionStage2
        }
    }
}

/// Interpret a model probability as percentage + band + advice.
///
/// Finite out-of-[0,1] input is clamped into range; non-finite input is
/// rejected. The band is decided on the unrounded percentage, and the
/// displayed percentage is rounded to one decimal afterwards.
pub fn interpret(probability: f64) -> Result<RiskInterpretation, RiskError> {
    if !probability.is_finite() {
        return Err(RiskError::invalid("probability", "must be a finite number"));
    }
    let percentage = probability.clamp(0.0, 1.0) * 100.0;
    let level = RiskLevel::from_percentage(percentage);
    Ok(RiskInterpretation {
        percentage: round1(percentage),
        level,
        advice: level.advice().to_string(),
    })
}

/// BMI from weight (kg) and height (m), rounded to one decimal.
///
/// Non-positive height (or weight) is invalid.
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> Option<f64> {
    if !weight_kg.is_finite() || !height_m.is_finite() {
        return None;
    }
    if weight_kg <= 0.0 || height_m <= 0.0 {
        return None;
    }
    Some(round1(weight_kg / (height_m * height_m)))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interpret_band_boundaries() {
        let cases = [
            (0.0, RiskLevel::Low, 0.0),
            (0.19, RiskLevel::Low, 19.0),
            (0.20, RiskLevel::Moderate, 20.0),
            (0.39, RiskLevel::Moderate, 39.0),
            (0.40, RiskLevel::Increased, 40.0),
            (0.59, RiskLevel::Increased, 59.0),
            (0.60, RiskLevel::High, 60.0),
            (1.0, RiskLevel::High, 100.0),
        ];
        for (probability, level, percentage) in cases {
            let out = interpret(probability).unwrap();
            assert_eq!(out.level, level, "p={}", probability);
            assert_eq!(out.percentage, percentage, "p={}", probability);
            assert_eq!(out.advice, level.advice());
        }
    }

    #[test]
    fn test_interpret_clamps_out_of_range() {
        let above = interpret(1.3).unwrap();
        assert_eq!(above.percentage, 100.0);
        assert_eq!(above.level, RiskLevel::High);

        let below = interpret(-0.2).unwrap();
        assert_eq!(below.percentage, 0.0);
        assert_eq!(below.level, RiskLevel::Low);
    }

    #[test]
    fn test_interpret_rejects_non_finite() {
        assert!(interpret(f64::NAN).is_err());
        assert!(interpret(f64::INFINITY).is_err());
    }

    #[test]
    fn test_bmi_known_value() {
        let bmi = calculate_bmi(70.0, 1.75).unwrap();
        assert_eq!(bmi, 22.9);
        assert_eq!(BmiCategory::from_bmi(bmi), BmiCategory::Normal);
    }

    #[test]
    fn test_bmi_invalid_height() {
        assert_eq!(calculate_bmi(70.0, 0.0), None);
        assert_eq!(calculate_bmi(70.0, -1.7), None);
        assert_eq!(calculate_bmi(0.0, 1.75), None);
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_bp_category_bands() {
        use BloodPressureCategory::*;
        assert_eq!(BloodPressureCategory::classify(110, 70), Normal);
        assert_eq!(BloodPressureCategory::classify(125, 75), Elevated);
        assert_eq!(BloodPressureCategory::classify(120, 80), HypertensionStage1);
        assert_eq!(BloodPressureCategory::classify(135, 70), HypertensionStage1);
        assert_eq!(BloodPressureCategory::classify(110, 85), HypertensionStage1);
        assert_eq!(BloodPressureCategory::classify(140, 95), HypertensionStage2);
        assert_eq!(BloodPressureCategory::classify(110, 95), HypertensionStage2);
    }

    #[test]
    fn test_bp_stage1_window_checked_before_stage2() {
        // A diastolic inside 80-89 keeps the reading in Stage 1 even when the
        // systolic alone would read as Stage 2.
        assert_eq!(
            BloodPressureCategory::classify(150, 85),
            BloodPressureCategory::HypertensionStage1
        );
    }
}
