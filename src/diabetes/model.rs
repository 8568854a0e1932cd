//! Frozen diabetes model

use std::path::Path;

use crate::error::RiskError;
use crate::model::{ClassifierParams, FeatureSchema, ModelArtifact};
use crate::types::FeatureVector;

/// Frozen diabetes model: random forest over the one-hot expanded schema
#[derive(Debug, Clone)]
pub struct FrozenDiabetesModel {
    artifact: ModelArtifact,
    schema: FeatureSchema,
}

impl FrozenDiabetesModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, RiskError> {
        artifact.validate()?;
        if !matches!(artifact.classifier, ClassifierParams::RandomForest { .. }) {
            return Err(RiskError::ModelUnavailable(format!(
                "diabetes model requires a random_forest artifact, got {}",
                artifact.classifier.kind()
            )));
        }
        let schema = artifact.schema();
        Ok(Self {
            artifact,
            schema,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, RiskError> {
        Self::from_artifact(ModelArtifact::from_json(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, RiskError> {
        Self::from_artifact(ModelArtifact::load(path)?)
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Model tag recorded on assessments.
    pub fn model_tag(&self) -> &str {
        &self.artifact.model
    }

    /// Positive-class probability for an encoded reading. Column order is
    /// verified against the trained schema before scaling.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, RiskError> {
        if !self.schema.matches(features) {
            return Err(RiskError::Encoding(format!(
                "feature columns [{}] do not match model schema [{}]",
                features.columns().join(", "),
                self.schema.columns().join(", ")
            )));
        }
        let scaled = self.artifact.scaler.transform(features.values())?;
        let proba = self.artifact.classifier.predict_proba(&scaled)?;
        Ok(proba[1])
    }
}
