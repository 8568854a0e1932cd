//! Pipeline orchestration
//!
//! This module provides the public scoring API. Free functions score one
//! input against a frozen model; [`RiskEngine`] adds the stateful wrapper
//! that owns the loaded models and the record store.
//!
//! Pipeline stages: input schema → Validator → FeatureEncoder → frozen model
//! → interpreter → RiskAssessment.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::diabetes::{score_diabetes_risk, FrozenDiabetesModel};
use crate::error::RiskError;
use crate::features::{EncodingPolicy, FeatureEncoder};
use crate::interpreter::interpret;
use crate::model::{FrozenHeartModel, SyntheticHeartModel, SYNTHETIC_MODEL_TAG};
use crate::schema::{DiabetesRiskInput, HeartRiskInput, VitalsInput};
use crate::store::{MemoryRecordStore, RecordStore, StoredRecord, DEFAULT_HISTORY_LIMIT};
use crate::summary::{history_series, HealthSummary, HistoryPoint};
use crate::types::{RiskAssessment, VitalReading};
use crate::validator::{
    validate_blood_pressure, validate_cholesterol, validate_heart_rate, validate_temperature,
    validate_weight,
};

/// Heart model artifact file name under the artifact directory
pub const HEART_ARTIFACT_FILE: &str = "heart_v1.json";
/// Diabetes model artifact file name under the artifact directory
pub const DIABETES_ARTIFACT_FILE: &str = "diabetes_v1.json";

/// Score one raw heart submission against a frozen model.
///
/// Validation and encoding failures propagate as typed errors: no score is
/// computed for bad input. A failure past encoding, inside the model itself,
/// produces the documented zero-score fallback instead of an error; the
/// returned assessment carries `fallback = true` and the cause is logged.
pub fn score_heart_risk(
    model: &FrozenHeartModel,
    input: &HeartRiskInput,
) -> Result<RiskAssessment, RiskError> {
    let features = FeatureEncoder::encode_heart(input, EncodingPolicy::Strict)?;

    let assessment = match model
        .predict(&features)
        .and_then(|probability| Ok((probability, interpret(probability)?)))
    {
        Ok((probability, interpretation)) => {
            RiskAssessment::from_interpretation(model.model_tag(), probability, interpretation)
        }
        Err(cause) => {
            tracing::warn!(
                model = model.model_tag(),
                error = %cause,
                "heart prediction failed, recording zero-score fallback"
            );
            RiskAssessment::fallback_zero(model.model_tag())
        }
    };

    tracing::info!(
        model = %assessment.model,
        probability = assessment.probability,
        level = assessment.level.as_str(),
        fallback = assessment.fallback,
        "heart risk scored"
    );
    Ok(assessment)
}

/// Score one heart submission with a throwaway synthetic model.
///
/// Uses the lenient 4-feature encoding, so it accepts any input; the score
/// is bounded noise, not a prediction, and differs across calls. See
/// [`SyntheticHeartModel`] for why.
pub fn score_heart_synthetic(input: &HeartRiskInput) -> Result<RiskAssessment, RiskError> {
    let features = FeatureEncoder::encode_heart(input, EncodingPolicy::Lenient)?;
    let probability = SyntheticHeartModel::new().score(&features)?;
    let interpretation = interpret(probability)?;

    let assessment =
        RiskAssessment::from_interpretation(SYNTHETIC_MODEL_TAG, probability, interpretation);
    tracing::info!(
        model = %assessment.model,
        probability = assessment.probability,
        level = assessment.level.as_str(),
        "synthetic heart risk scored"
    );
    Ok(assessment)
}

/// Validate a raw vitals submission into a reading.
///
/// Absent fields stay absent; a present field that fails validation rejects
/// the whole submission with a field-level error rather than being zeroed or
/// dropped.
pub fn validate_vitals(input: &VitalsInput) -> Result<VitalReading, RiskError> {
    let mut reading = VitalReading::at(Utc::now());

    if let Some(raw) = input.blood_pressure.as_deref() {
        reading.blood_pressure = Some(validate_blood_pressure(raw).ok_or_else(|| {
            RiskError::invalid(
                "blood_pressure",
                format!("expected \"systolic/diastolic\" within range, got {:?}", raw),
            )
        })?);
    }
    if let Some(raw) = input.heart_rate {
        reading.heart_rate = Some(validate_heart_rate(raw).ok_or_else(|| {
            RiskError::invalid("heart_rate", format!("must be between 30 and 220, got {}", raw))
        })?);
    }
    if let Some(raw) = input.temperature {
        reading.temperature_c = Some(validate_temperature(raw).ok_or_else(|| {
            RiskError::invalid("temperature", format!("must be between 35 and 42, got {}", raw))
        })?);
    }
    if let Some(raw) = input.weight {
        reading.weight_kg = Some(validate_weight(raw).ok_or_else(|| {
            RiskError::invalid("weight", format!("must be between 20 and 300, got {}", raw))
        })?);
    }
    if let Some(raw) = input.cholesterol {
        reading.cholesterol = Some(validate_cholesterol(raw).ok_or_else(|| {
            RiskError::invalid("cholesterol", format!("must be between 100 and 600, got {}", raw))
        })?);
    }

    Ok(reading)
}

/// Stateful engine owning the frozen models and the record store.
///
/// Models are loaded once and shared read-only; scoring never rebuilds them.
/// Construction fails fast if an artifact is missing or malformed, so an
/// engine that exists can always serve scoring traffic.
#[derive(Debug)]
pub struct RiskEngine {
    heart: Arc<FrozenHeartModel>,
    diabetes: Arc<FrozenDiabetesModel>,
    store: MemoryRecordStore,
}

impl RiskEngine {
    /// Engine from already-loaded models and an empty store.
    pub fn new(heart: FrozenHeartModel, diabetes: FrozenDiabetesModel) -> Self {
        Self {
            heart: Arc::new(heart),
            diabetes: Arc::new(diabetes),
            store: MemoryRecordStore::new(),
        }
    }

    /// Engine from an artifact directory containing [`HEART_ARTIFACT_FILE`]
    /// and [`DIABETES_ARTIFACT_FILE`]. Any load failure is fatal.
    pub fn from_artifact_dir(dir: &Path) -> Result<Self, RiskError> {
        let heart = FrozenHeartModel::load(&dir.join(HEART_ARTIFACT_FILE))?;
        let diabetes = FrozenDiabetesModel::load(&dir.join(DIABETES_ARTIFACT_FILE))?;
        tracing::info!(dir = %dir.display(), "risk engine ready");
        Ok(Self::new(heart, diabetes))
    }

    /// Shared handle to the frozen heart model.
    pub fn heart_model(&self) -> Arc<FrozenHeartModel> {
        Arc::clone(&self.heart)
    }

    /// Shared handle to the frozen diabetes model.
    pub fn diabetes_model(&self) -> Arc<FrozenDiabetesModel> {
        Arc::clone(&self.diabetes)
    }

    /// Restore record state from JSON.
    pub fn load_records(&mut self, json: &str) -> Result<(), RiskError> {
        self.store = MemoryRecordStore::from_json(json)?;
        Ok(())
    }

    /// Serialize record state to JSON.
    pub fn save_records(&self) -> Result<String, RiskError> {
        Ok(self.store.to_json()?)
    }

    /// Validate and store one vitals submission without scoring.
    pub fn submit_vitals(
        &mut self,
        user_id: &str,
        input: &VitalsInput,
    ) -> Result<VitalReading, RiskError> {
        let reading = validate_vitals(input)?;
        self.store.save(user_id, reading.clone(), None)?;
        tracing::info!(user = user_id, "vitals recorded");
        Ok(reading)
    }

    /// Score a heart submission and store the reading with its assessment.
    pub fn score_heart(
        &mut self,
        user_id: &str,
        input: &HeartRiskInput,
    ) -> Result<RiskAssessment, RiskError> {
        let assessment = score_heart_risk(&self.heart, input)?;
        let reading = heart_reading(input, assessment.created_at);
        self.store
            .save(user_id, reading, Some(assessment.clone()))?;
        Ok(assessment)
    }

    /// Score a heart submission with the synthetic model and store the result.
    pub fn score_heart_synthetic(
        &mut self,
        user_id: &str,
        input: &HeartRiskInput,
    ) -> Result<RiskAssessment, RiskError> {
        let assessment = score_heart_synthetic(input)?;
        let reading = heart_reading(input, assessment.created_at);
        self.store
            .save(user_id, reading, Some(assessment.clone()))?;
        Ok(assessment)
    }

    /// Score a diabetes submission and store the assessment.
    ///
    /// Diabetes submissions carry no general vitals, so the stored reading is
    /// empty apart from its timestamp; the assessment hangs off it for
    /// history.
    pub fn score_diabetes(
        &mut self,
        user_id: &str,
        input: &DiabetesRiskInput,
    ) -> Result<RiskAssessment, RiskError> {
        let assessment = score_diabetes_risk(&self.diabetes, input)?;
        let reading = VitalReading::at(assessment.created_at);
        self.store
            .save(user_id, reading, Some(assessment.clone()))?;
        Ok(assessment)
    }

    /// Summary of the user's latest record, empty if none exists.
    pub fn latest_summary(&self, user_id: &str) -> HealthSummary {
        self.store
            .get_latest(user_id)
            .map(HealthSummary::from_record)
            .unwrap_or_else(HealthSummary::empty)
    }

    /// Up to `limit` stored records, most-recent-first.
    pub fn history(&self, user_id: &str, limit: usize) -> Vec<&StoredRecord> {
        self.store.get_history(user_id, limit)
    }

    /// Chronological chart series over the default history window.
    pub fn history_series(&self, user_id: &str) -> Vec<HistoryPoint> {
        history_series(&self.store.get_history(user_id, DEFAULT_HISTORY_LIMIT))
    }
}

/// Vitals carried by a heart submission, kept for history alongside the
/// assessment. Values that fail validation are left unrecorded here; the
/// strict encoder has already decided whether they block scoring.
fn heart_reading(input: &HeartRiskInput, recorded_at: DateTime<Utc>) -> VitalReading {
    let mut reading = VitalReading::at(recorded_at);
    reading.blood_pressure = input
        .blood_pressure
        .as_deref()
        .and_then(validate_blood_pressure);
    reading.heart_rate = input.heart_rate.and_then(validate_heart_rate);
    reading.weight_kg = input.weight.and_then(validate_weight);
    reading.cholesterol = input.cholesterol.and_then(validate_cholesterol);
    reading
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Flag;
    use crate::types::RiskLevel;
    use pretty_assertions::assert_eq;

    const HEART_ARTIFACT: &str = include_str!("../models/heart_v1.json");
    const DIABETES_ARTIFACT: &str = include_str!("../models/diabetes_v1.json");

    fn make_engine() -> RiskEngine {
        RiskEngine::new(
            FrozenHeartModel::from_json(HEART_ARTIFACT).unwrap(),
            FrozenDiabetesModel::from_json(DIABETES_ARTIFACT).unwrap(),
        )
    }

    fn heart_input() -> HeartRiskInput {
        HeartRiskInput {
            schema_version: None,
            age: Some(55.0),
            blood_pressure: Some("150/95".to_string()),
            cholesterol: Some(240.0),
            heart_rate: Some(80.0),
            st_depression: Some(1.2),
            weight: Some(82.0),
        }
    }

    fn diabetes_input(age: f64, bmi: f64, hba1c: f64, glucose: f64) -> DiabetesRiskInput {
        DiabetesRiskInput {
            schema_version: None,
            gender: Some("Female".to_string()),
            age: Some(age),
            hypertension: Some(Flag::Number(1.0)),
            heart_disease: Some(Flag::Number(0.0)),
            smoking_history: Some("former".to_string()),
            bmi: Some(bmi),
            hba1c_level: Some(hba1c),
            blood_glucose_level: Some(glucose),
        }
    }

    #[test]
    fn test_heart_end_to_end_high_risk() {
        let mut engine = make_engine();
        let assessment = engine.score_heart("alice", &heart_input()).unwrap();

        assert!((0.88..0.92).contains(&assessment.probability));
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.advice, "Urgent medical attention recommended");
        assert!(!assessment.fallback);
        assert_eq!(assessment.model, "heart_logreg");
    }

    #[test]
    fn test_heart_end_to_end_low_risk() {
        let model = FrozenHeartModel::from_json(HEART_ARTIFACT).unwrap();
        let input = HeartRiskInput {
            schema_version: None,
            age: Some(45.0),
            blood_pressure: Some("120/80".to_string()),
            cholesterol: Some(180.0),
            heart_rate: Some(170.0),
            st_depression: Some(0.0),
            weight: None,
        };

        let assessment = score_heart_risk(&model, &input).unwrap();
        assert!(assessment.probability < 0.2);
        assert_eq!(assessment.level, RiskLevel::Low);
    }

    #[test]
    fn test_heart_age_150_yields_invalid_outcome_and_no_record() {
        let mut engine = make_engine();
        let mut input = heart_input();
        input.age = Some(150.0);

        let err = engine.score_heart("alice", &input).unwrap_err();
        assert!(matches!(err, RiskError::Validation { ref field, .. } if field == "age"));
        assert!(engine.history("alice", 10).is_empty());
    }

    #[test]
    fn test_heart_scoring_is_idempotent() {
        let model = FrozenHeartModel::from_json(HEART_ARTIFACT).unwrap();
        let input = heart_input();

        let first = score_heart_risk(&model, &input).unwrap();
        let second = score_heart_risk(&model, &input).unwrap();
        assert_eq!(first.probability, second.probability);
        assert_eq!(first.level, second.level);
    }

    #[test]
    fn test_prediction_failure_becomes_zero_fallback() {
        // Same shape as the real artifact but one renamed column, so the
        // encoder's output no longer matches the model schema and the
        // prediction stage fails.
        let json = HEART_ARTIFACT.replace(r#""oldpeak""#, r#""st_dep""#);
        let model = FrozenHeartModel::from_json(&json).unwrap();

        let assessment = score_heart_risk(&model, &heart_input()).unwrap();
        assert!(assessment.fallback);
        assert_eq!(assessment.probability, 0.0);
        assert_eq!(assessment.level, RiskLevel::Low);
    }

    #[test]
    fn test_synthetic_scores_vary_but_stay_banded() {
        let input = heart_input();
        let mut seen = Vec::new();
        for _ in 0..25 {
            let assessment = score_heart_synthetic(&input).unwrap();
            assert!((0.0..=1.0).contains(&assessment.probability));
            assert_eq!(assessment.model, SYNTHETIC_MODEL_TAG);
            assert!(!assessment.advice.is_empty());
            seen.push(assessment.probability);
        }
        let varies = seen.iter().any(|p| (p - seen[0]).abs() > 1e-9);
        assert!(varies, "synthetic scorer returned a constant: {:?}", seen);
    }

    #[test]
    fn test_synthetic_accepts_empty_input() {
        let input = HeartRiskInput::default();
        let assessment = score_heart_synthetic(&input).unwrap();
        assert!((0.0..=1.0).contains(&assessment.probability));
    }

    #[test]
    fn test_diabetes_end_to_end_high_risk() {
        let mut engine = make_engine();
        let assessment = engine
            .score_diabetes("alice", &diabetes_input(58.0, 33.0, 7.8, 210.0))
            .unwrap();

        // Hand-walked forest: (0.93 + 0.95 + 0.75 + 0.85 + 0.7) / 5.
        assert!((assessment.probability - 0.836).abs() < 1e-9);
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.model, "diabetes_rf");
    }

    #[test]
    fn test_diabetes_end_to_end_low_risk() {
        let model = FrozenDiabetesModel::from_json(DIABETES_ARTIFACT).unwrap();
        let mut input = diabetes_input(30.0, 23.0, 5.0, 95.0);
        input.hypertension = Some(Flag::Number(0.0));
        input.smoking_history = Some("never".to_string());

        let assessment = score_diabetes_risk(&model, &input).unwrap();
        assert!(assessment.probability < 0.1);
        assert_eq!(assessment.level, RiskLevel::Low);
    }

    #[test]
    fn test_diabetes_unseen_smoking_category_scores_against_real_schema() {
        let model = FrozenDiabetesModel::from_json(DIABETES_ARTIFACT).unwrap();
        let mut input = diabetes_input(30.0, 23.0, 5.0, 95.0);
        input.smoking_history = Some("vaper".to_string());

        assert!(score_diabetes_risk(&model, &input).is_ok());
    }

    #[test]
    fn test_submit_vitals_stores_and_summarizes() {
        let mut engine = make_engine();
        let input = VitalsInput {
            schema_version: None,
            blood_pressure: Some("130/85".to_string()),
            heart_rate: Some(72.0),
            temperature: Some(36.6),
            weight: Some(70.0),
            cholesterol: None,
        };

        engine.submit_vitals("alice", &input).unwrap();
        let summary = engine.latest_summary("alice");

        assert_eq!(summary.blood_pressure.as_deref(), Some("130/85"));
        assert_eq!(summary.heart_rate, Some(72.0));
        assert!(summary.cholesterol.is_none());
        assert!(summary.render().contains("- Cholesterol: not recorded"));
    }

    #[test]
    fn test_invalid_vitals_are_rejected_not_zeroed() {
        let mut engine = make_engine();
        let input = VitalsInput {
            schema_version: None,
            blood_pressure: Some("300/80".to_string()),
            heart_rate: Some(72.0),
            temperature: None,
            weight: None,
            cholesterol: None,
        };

        let err = engine.submit_vitals("alice", &input).unwrap_err();
        assert!(matches!(err, RiskError::Validation { ref field, .. } if field == "blood_pressure"));
        assert!(engine.history("alice", 10).is_empty());
    }

    #[test]
    fn test_scored_submission_lands_in_history_and_summary() {
        let mut engine = make_engine();
        let assessment = engine.score_heart("alice", &heart_input()).unwrap();

        let history = engine.history("alice", 10);
        assert_eq!(history.len(), 1);
        let stored = history[0].assessment.as_ref().unwrap();
        assert_eq!(stored.id, assessment.id);

        let summary = engine.latest_summary("alice");
        assert_eq!(summary.blood_pressure.as_deref(), Some("150/95"));
        assert_eq!(summary.risk_score, Some(assessment.percentage));
    }

    #[test]
    fn test_history_series_orders_chronologically() {
        let mut engine = make_engine();
        for systolic in [120, 130, 140] {
            let input = VitalsInput {
                schema_version: None,
                blood_pressure: Some(format!("{}/80", systolic)),
                heart_rate: None,
                temperature: None,
                weight: None,
                cholesterol: None,
            };
            engine.submit_vitals("alice", &input).unwrap();
        }

        let series = engine.history_series("alice");
        let systolic: Vec<Option<i32>> = series.iter().map(|p| p.systolic).collect();
        assert_eq!(systolic, vec![Some(120), Some(130), Some(140)]);
    }

    #[test]
    fn test_record_state_round_trip() {
        let mut engine = make_engine();
        engine.score_heart("alice", &heart_input()).unwrap();
        let saved = engine.save_records().unwrap();

        let mut restored = make_engine();
        restored.load_records(&saved).unwrap();
        assert_eq!(restored.history("alice", 10).len(), 1);
        assert_eq!(
            restored.latest_summary("alice").blood_pressure.as_deref(),
            Some("150/95")
        );
    }

    #[test]
    fn test_engine_loads_from_artifact_dir() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("models");
        let engine = RiskEngine::from_artifact_dir(&dir).unwrap();
        assert_eq!(engine.heart_model().model_tag(), "heart_logreg");
        assert_eq!(engine.diabetes_model().model_tag(), "diabetes_rf");
    }

    #[test]
    fn test_missing_artifact_dir_fails_fast() {
        let err = RiskEngine::from_artifact_dir(Path::new("/nonexistent/models")).unwrap_err();
        assert!(matches!(err, RiskError::ModelUnavailable(_)));
    }
}
