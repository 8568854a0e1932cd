//! Diabetes risk pipeline
//!
//! This module validates a raw diabetes submission, reindexes it onto the
//! frozen model's one-hot column schema, and scores it with a frozen
//! random-forest artifact.
//!
//! Pipeline: DiabetesRiskInput → DiabetesReading → FeatureVector →
//! FrozenDiabetesModel → RiskAssessment

pub mod features;
pub mod model;
pub mod pipeline;
pub mod types;

pub use features::encode_diabetes_reading;
pub use model::FrozenDiabetesModel;
pub use pipeline::score_diabetes_risk;
pub use types::DiabetesReading;
