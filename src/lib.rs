//! Vitalscore - risk-scoring engine for personal health tracking
//!
//! Vitalscore turns raw, loosely-typed health submissions into bounded risk
//! probabilities through a deterministic pipeline: input schema → validation
//! → feature encoding → frozen model inference → risk interpretation.
//!
//! ## Modules
//!
//! - **Heart pipeline**: logistic regression over five clinical vitals, plus
//!   a documented synthetic variant for artifact-free call sites
//! - **Diabetes pipeline**: random forest over a one-hot expanded schema
//! - **Interpretation**: risk bands, BMI and blood-pressure categories
//! - **Records**: per-user history store plus chat/chart summaries

pub mod diabetes;
pub mod error;
pub mod features;
pub mod interpreter;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod store;
pub mod summary;
pub mod types;
pub mod validator;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use error::RiskError;
pub use pipeline::{score_heart_risk, score_heart_synthetic, validate_vitals, RiskEngine};

// Model exports
pub use diabetes::{score_diabetes_risk, FrozenDiabetesModel};
pub use model::{FrozenHeartModel, ModelArtifact, ARTIFACT_VERSION};

// Schema exports
pub use schema::{
    DiabetesRiskInput, HeartRiskInput, VitalsInput, DIABETES_SCHEMA_VERSION, HEART_SCHEMA_VERSION,
    VITALS_SCHEMA_VERSION,
};

// Interpretation exports
pub use interpreter::{calculate_bmi, interpret, BloodPressureCategory, BmiCategory};
pub use summary::HealthSummary;
pub use types::{RiskAssessment, RiskLevel, VitalReading};

/// Vitalscore version embedded in FFI and CLI output
pub const VITALSCORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name recorded in diagnostics
pub const PRODUCER_NAME: &str = "vitalscore";
