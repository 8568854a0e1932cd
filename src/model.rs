//! Frozen model artifacts and inference
//!
//! A frozen model is a (scaler, classifier, column schema) triple fit offline
//! and loaded once per process. Everything here is read-only after loading:
//! scoring never mutates model state, so a loaded model can be shared across
//! requests by reference.
//!
//! The one deliberate exception is [`SyntheticHeartModel`], which rebuilds a
//! throwaway classifier on every call and is documented as noise, not a
//! prediction.

use std::path::Path;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::RiskError;
use crate::types::FeatureVector;

/// Artifact format tag expected in every model file
pub const ARTIFACT_VERSION: &str = "risk.model.v1";

/// Logistic sigmoid with overflow guards
pub fn sigmoid(x: f64) -> f64 {
    if x > 20.0 {
        1.0
    } else if x < -20.0 {
        0.0
    } else {
        1.0 / (1.0 + (-x).exp())
    }
}

/// Ordered feature-column list a model was fit against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Order-sensitive match between a feature vector and this schema.
    pub fn matches(&self, features: &FeatureVector) -> bool {
        self.columns == features.columns()
    }
}

/// Frozen standardization parameters (per-column mean and standard deviation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl StandardScaler {
    /// `(x - mean) / std`, column by column.
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>, RiskError> {
        if values.len() != self.mean.len() {
            return Err(RiskError::Prediction(format!(
                "scaler expects {} features, got {}",
                self.mean.len(),
                values.len()
            )));
        }
        Ok(values
            .iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(value, (mean, std))| (value - mean) / std)
            .collect())
    }
}

/// One node of a frozen decision tree
///
/// Split nodes route on `value[feature] <= threshold` (left) vs greater
/// (right); leaves carry the positive-class fraction seen at training time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf {
        leaf: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Walk the tree for one scaled sample.
    pub fn predict(&self, values: &[f64]) -> f64 {
        match self {
            TreeNode::Leaf { leaf } => *leaf,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if values[*feature] <= *threshold {
                    left.predict(values)
                } else {
                    right.predict(values)
                }
            }
        }
    }

    fn check(&self, n_features: usize) -> Result<(), String> {
        match self {
            TreeNode::Leaf { leaf } => {
                if !(0.0..=1.0).contains(leaf) {
                    return Err(format!("leaf probability {} outside [0, 1]", leaf));
                }
                Ok(())
            }
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= n_features {
                    return Err(format!(
                        "split references feature {} but the schema has {}",
                        feature, n_features
                    ));
                }
                if !threshold.is_finite() {
                    return Err(format!("non-finite split threshold {}", threshold));
                }
                left.check(n_features)?;
                right.check(n_features)
            }
        }
    }
}

/// Frozen classifier parameters, tagged by kind in the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierParams {
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    RandomForest {
        trees: Vec<TreeNode>,
    },
}

impl ClassifierParams {
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifierParams::LogisticRegression { .. } => "logistic_regression",
            ClassifierParams::RandomForest { .. } => "random_forest",
        }
    }

    /// Two-class probability output `[negative, positive]` for one scaled
    /// sample. Callers select index 1 for the risk score.
    pub fn predict_proba(&self, scaled: &[f64]) -> Result<[f64; 2], RiskError> {
        match self {
            ClassifierParams::LogisticRegression {
                coefficients,
                intercept,
            } => {
                if scaled.len() != coefficients.len() {
                    return Err(RiskError::Prediction(format!(
                        "classifier expects {} features, got {}",
                        coefficients.len(),
                        scaled.len()
                    )));
                }
                let z: f64 = scaled
                    .iter()
                    .zip(coefficients.iter())
                    .map(|(x, w)| x * w)
                    .sum::<f64>()
                    + intercept;
                let positive = sigmoid(z);
                Ok([1.0 - positive, positive])
            }
            ClassifierParams::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(RiskError::Prediction("forest has no trees".to_string()));
                }
                let positive: f64 =
                    trees.iter().map(|tree| tree.predict(scaled)).sum::<f64>() / trees.len() as f64;
                Ok([1.0 - positive, positive])
            }
        }
    }
}

/// On-disk model artifact: schema + scaler + classifier, plus provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Artifact format tag, always [`ARTIFACT_VERSION`]
    pub artifact: String,
    /// Model tag recorded on every assessment, e.g. "heart_logreg"
    pub model: String,
    /// When the model was fit (informational)
    pub trained_at: DateTime<Utc>,
    /// Feature columns in training order
    pub columns: Vec<String>,
    /// Frozen standardization parameters
    pub scaler: StandardScaler,
    /// Frozen classifier parameters
    pub classifier: ClassifierParams,
}

impl ModelArtifact {
    /// Parse and validate an artifact from JSON. Any defect is fatal at load
    /// time; scoring never starts against a partly-valid model.
    pub fn from_json(json: &str) -> Result<Self, RiskError> {
        let artifact: Self = serde_json::from_str(json)
            .map_err(|e| RiskError::ModelUnavailable(format!("artifact parse failed: {}", e)))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Read and validate an artifact file.
    pub fn load(path: &Path) -> Result<Self, RiskError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            RiskError::ModelUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        let artifact = Self::from_json(&json)?;
        tracing::info!(
            model = %artifact.model,
            kind = artifact.classifier.kind(),
            columns = artifact.columns.len(),
            path = %path.display(),
            "loaded frozen model artifact"
        );
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), RiskError> {
        let fail = |reason: String| Err(RiskError::ModelUnavailable(reason));

        if self.artifact != ARTIFACT_VERSION {
            return fail(format!(
                "unknown artifact tag {:?}, expected {:?}",
                self.artifact, ARTIFACT_VERSION
            ));
        }
        if self.columns.is_empty() {
            return fail("artifact has an empty column schema".to_string());
        }
        if self.scaler.mean.len() != self.columns.len()
            || self.scaler.std.len() != self.columns.len()
        {
            return fail(format!(
                "scaler dimensions ({} mean / {} std) do not match {} columns",
                self.scaler.mean.len(),
                self.scaler.std.len(),
                self.columns.len()
            ));
        }
        if self
            .scaler
            .std
            .iter()
            .any(|std| !std.is_finite() || *std <= 0.0)
        {
            return fail("scaler std values must be finite and positive".to_string());
        }
        match &self.classifier {
            ClassifierParams::LogisticRegression {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != self.columns.len() {
                    return fail(format!(
                        "{} coefficients do not match {} columns",
                        coefficients.len(),
                        self.columns.len()
                    ));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return fail("classifier parameters must be finite".to_string());
                }
            }
            ClassifierParams::RandomForest { trees } => {
                if trees.is_empty() {
                    return fail("forest artifact has no trees".to_string());
                }
                for (index, tree) in trees.iter().enumerate() {
                    if let Err(reason) = tree.check(self.columns.len()) {
                        return fail(format!("tree {}: {}", index, reason));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn schema(&self) -> FeatureSchema {
        FeatureSchema::new(self.columns.clone())
    }
}

/// Frozen heart-disease model: logistic regression over 5 vitals features
#[derive(Debug, Clone)]
pub struct FrozenHeartModel {
    artifact: ModelArtifact,
    schema: FeatureSchema,
}

impl FrozenHeartModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, RiskError> {
        artifact.validate()?;
        if !matches!(
            artifact.classifier,
            ClassifierParams::LogisticRegression { .. }
        ) {
            return Err(RiskError::ModelUnavailable(format!(
                "heart model requires a logistic_regression artifact, got {}",
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

    /// Positive-class probability for an encoded reading.
    ///
    /// The vector's column order is verified against the trained schema
    /// before anything is computed; a mismatch would otherwise produce a
    /// silently wrong score.
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

/// Model tag for synthetic heart scores
pub const SYNTHETIC_MODEL_TAG: &str = "heart_synthetic";

/// Heart scorer that fits a throwaway classifier on random synthetic data at
/// every call.
///
/// Standardizing the single submitted sample against itself zeroes every
/// feature, so the output depends only on the random training draw: a number
/// bounded to [0, 1], not a prediction. Repeated calls with identical input
/// return different scores. Kept as a distinct, clearly named operation for
/// call sites that have no trained artifact; the frozen path is the primary
/// scorer.
#[derive(Debug, Clone)]
pub struct SyntheticHeartModel {
    training_rows: usize,
    epochs: usize,
    learning_rate: f64,
}

impl Default for SyntheticHeartModel {
    fn default() -> Self {
        Self {
            training_rows: 32,
            epochs: 60,
            learning_rate: 0.1,
        }
    }
}

impl SyntheticHeartModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score one encoded reading; output is random noise in [0, 1].
    pub fn score(&self, features: &FeatureVector) -> Result<f64, RiskError> {
        if features.is_empty() {
            return Err(RiskError::Prediction(
                "cannot score an empty feature vector".to_string(),
            ));
        }
        let n_features = features.len();
        let mut rng = rand::thread_rng();

        // Fresh uniform features with coin-flip labels, refit from scratch.
        let rows: Vec<(Vec<f64>, f64)> = (0..self.training_rows)
            .map(|_| {
                let xs: Vec<f64> = (0..n_features).map(|_| rng.gen::<f64>()).collect();
                let label = if rng.gen_bool(0.5) { 1.0 } else { 0.0 };
                (xs, label)
            })
            .collect();

        let mut weights = vec![0.0; n_features];
        let mut intercept = 0.0;
        for _ in 0..self.epochs {
            for (xs, label) in &rows {
                let z: f64 = xs
                    .iter()
                    .zip(weights.iter())
                    .map(|(x, w)| x * w)
                    .sum::<f64>()
                    + intercept;
                let gradient = sigmoid(z) - label;
                for (weight, x) in weights.iter_mut().zip(xs.iter()) {
                    *weight -= self.learning_rate * gradient * x;
                }
                intercept -= self.learning_rate * gradient;
            }
        }

        // Single-sample standardization: every column becomes zero, erasing
        // the reading's contribution.
        let standardized = vec![0.0; n_features];
        let z: f64 = standardized
            .iter()
            .zip(weights.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + intercept;
        Ok(sigmoid(z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn heart_artifact_json() -> &'static str {
        r#"{
            "artifact": "risk.model.v1",
            "model": "heart_logreg",
            "trained_at": "2024-11-02T09:14:00Z",
            "columns": ["age", "trestbps", "chol", "thalach", "oldpeak"],
            "scaler": {
                "mean": [54.37, 131.62, 246.26, 149.65, 1.04],
                "std": [9.08, 17.54, 51.83, 22.91, 1.16]
            },
            "classifier": {
                "kind": "logistic_regression",
                "coefficients": [0.35, 0.21, 0.17, -0.58, 0.69],
                "intercept": 0.11
            }
        }"#
    }

    fn heart_features(values: [f64; 5]) -> FeatureVector {
        let columns = ["age", "trestbps", "chol", "thalach", "oldpeak"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        FeatureVector::new(columns, values.to_vec()).unwrap()
    }

    #[test]
    fn test_sigmoid_range_and_guards() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert_eq!(sigmoid(25.0), 1.0);
        assert_eq!(sigmoid(-25.0), 0.0);
        assert!(sigmoid(2.0) > sigmoid(1.0));
        assert!(sigmoid(1.0) > 0.5 && sigmoid(1.0) < 1.0);
    }

    #[test]
    fn test_scaler_transform() {
        let scaler = StandardScaler {
            mean: vec![10.0, 100.0],
            std: vec![2.0, 50.0],
        };
        let scaled = scaler.transform(&[14.0, 75.0]).unwrap();
        assert_eq!(scaled, vec![2.0, -0.5]);
    }

    #[test]
    fn test_scaler_rejects_wrong_width() {
        let scaler = StandardScaler {
            mean: vec![0.0, 0.0],
            std: vec![1.0, 1.0],
        };
        assert!(scaler.transform(&[1.0]).is_err());
    }

    #[test]
    fn test_logistic_proba_sums_to_one() {
        let classifier = ClassifierParams::LogisticRegression {
            coefficients: vec![1.0, -0.5],
            intercept: 0.2,
        };
        let proba = classifier.predict_proba(&[0.4, 1.1]).unwrap();
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        assert!(proba[1] > 0.0 && proba[1] < 1.0);
    }

    #[test]
    fn test_tree_walk() {
        let tree = TreeNode::Split {
            feature: 0,
            threshold: 0.5,
            left: Box::new(TreeNode::Leaf { leaf: 0.1 }),
            right: Box::new(TreeNode::Leaf { leaf: 0.9 }),
        };
        assert_eq!(tree.predict(&[0.2]), 0.1);
        assert_eq!(tree.predict(&[0.5]), 0.1);
        assert_eq!(tree.predict(&[0.7]), 0.9);
    }

    #[test]
    fn test_forest_averages_trees() {
        let classifier = ClassifierParams::RandomForest {
            trees: vec![
                TreeNode::Leaf { leaf: 0.2 },
                TreeNode::Leaf { leaf: 0.4 },
                TreeNode::Leaf { leaf: 0.9 },
            ],
        };
        let proba = classifier.predict_proba(&[0.0]).unwrap();
        assert!((proba[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_artifact_parses_and_validates() {
        let artifact = ModelArtifact::from_json(heart_artifact_json()).unwrap();
        assert_eq!(artifact.model, "heart_logreg");
        assert_eq!(artifact.columns.len(), 5);
        assert_eq!(artifact.classifier.kind(), "logistic_regression");
    }

    #[test]
    fn test_artifact_rejects_unknown_tag() {
        let json = heart_artifact_json().replace("risk.model.v1", "risk.model.v9");
        assert!(matches!(
            ModelArtifact::from_json(&json),
            Err(RiskError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_artifact_rejects_dimension_mismatch() {
        let json = heart_artifact_json().replace(
            r#""coefficients": [0.35, 0.21, 0.17, -0.58, 0.69]"#,
            r#""coefficients": [0.35, 0.21]"#,
        );
        assert!(ModelArtifact::from_json(&json).is_err());
    }

    #[test]
    fn test_artifact_rejects_zero_std() {
        let json = heart_artifact_json().replace("9.08", "0.0");
        assert!(ModelArtifact::from_json(&json).is_err());
    }

    #[test]
    fn test_frozen_heart_model_is_deterministic() {
        let model = FrozenHeartModel::from_json(heart_artifact_json()).unwrap();
        let features = heart_features([55.0, 150.0, 240.0, 80.0, 1.2]);

        let first = model.predict(&features).unwrap();
        let second = model.predict(&features).unwrap();
        assert_eq!(first, second);
        assert!((0.0..=1.0).contains(&first));
    }

    #[test]
    fn test_frozen_heart_model_rejects_column_order_mismatch() {
        let model = FrozenHeartModel::from_json(heart_artifact_json()).unwrap();
        let shuffled = FeatureVector::new(
            ["trestbps", "age", "chol", "thalach", "oldpeak"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            vec![150.0, 55.0, 240.0, 80.0, 1.2],
        )
        .unwrap();

        assert!(matches!(
            model.predict(&shuffled),
            Err(RiskError::Encoding(_))
        ));
    }

    #[test]
    fn test_heart_model_requires_logistic_artifact() {
        let json = heart_artifact_json().replace(
            r#""kind": "logistic_regression",
                "coefficients": [0.35, 0.21, 0.17, -0.58, 0.69],
                "intercept": 0.11"#,
            r#""kind": "random_forest",
                "trees": [{"leaf": 0.5}]"#,
        );
        assert!(FrozenHeartModel::from_json(&json).is_err());
    }

    #[test]
    fn test_synthetic_score_is_bounded() {
        let model = SyntheticHeartModel::new();
        let features = FeatureVector::new(
            ["systolic", "diastolic", "heart_rate", "weight"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            vec![120.0, 80.0, 70.0, 70.0],
        )
        .unwrap();

        for _ in 0..10 {
            let score = model.score(&features).unwrap();
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_synthetic_score_varies_across_calls() {
        let model = SyntheticHeartModel::new();
        let features = FeatureVector::new(
            ["systolic", "diastolic", "heart_rate", "weight"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            vec![120.0, 80.0, 70.0, 70.0],
        )
        .unwrap();

        let scores: Vec<f64> = (0..25)
            .map(|_| model.score(&features).unwrap())
            .collect();
        let varies = scores.iter().any(|s| (s - scores[0]).abs() > 1e-9);
        assert!(varies, "synthetic scorer returned a constant: {:?}", scores);
    }
}
