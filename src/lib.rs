//! Synheart Slumber - On-device sleep quality assessment
//!
//! Slumber predicts a Good/Poor sleep quality label from lifestyle and
//! physiology inputs through a fixed, hand-authored rule set: factor scoring →
//! aggregation → logistic transform → classification → factor ranking.
//!
//! ## Modules
//!
//! - **Predictor**: the scoring and classification core
//! - **Adapters**: parse raw JSON and front-end form submissions into inputs
//! - **Reports**: full breakdowns with producer metadata and input warnings

pub mod adapter;
pub mod encoder;
pub mod error;
pub mod factors;
pub mod predictor;
pub mod types;
pub mod validation;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use adapter::{parse_form, FormAdapter, FormSubmission, InputAdapter, RecordAdapter};
pub use encoder::{report_json, PredictionReport, ReportEncoder};
pub use error::ComputeError;
pub use predictor::{assess, predict, predict_json, Assessment, SleepQualityPredictor};
pub use types::{
    BmiCategory, Factor, FactorImpact, FactorScores, Gender, PredictionInput, PredictionResult,
    SleepQuality,
};
pub use validation::{check_input, InputWarning};

/// Slumber version embedded in all reports
pub const SLUMBER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "synheart-slumber";
