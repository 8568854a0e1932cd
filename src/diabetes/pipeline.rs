//! Diabetes scoring pipeline
//!
//! Validate → encode → predict → interpret. Every failure is a typed error;
//! this path has no zero-score fallback, a failed prediction surfaces as
//! [`RiskError::Prediction`] with the cause attached.

use crate::diabetes::features::encode_diabetes_reading;
use crate::diabetes::model::FrozenDiabetesModel;
use crate::diabetes::types::DiabetesReading;
use crate::error::RiskError;
use crate::interpreter::interpret;
use crate::schema::DiabetesRiskInput;
use crate::types::RiskAssessment;

/// Score one raw diabetes submission against a frozen model.
pub fn score_diabetes_risk(
    model: &FrozenDiabetesModel,
    input: &DiabetesRiskInput,
) -> Result<RiskAssessment, RiskError> {
    let reading = DiabetesReading::from_input(input)?;
    let features = encode_diabetes_reading(&reading, model.schema())?;
    let probability = model.predict(&features)?;
    let interpretation = interpret(probability)?;

    let assessment =
        RiskAssessment::from_interpretation(model.model_tag(), probability, interpretation);
    tracing::info!(
        model = %assessment.model,
        probability = assessment.probability,
        level = assessment.level.as_str(),
        "diabetes risk scored"
    );
    Ok(assessment)
}
