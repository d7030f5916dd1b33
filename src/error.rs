//! Error types for Synheart Slumber
//!
//! Prediction itself never fails. These errors only arise at the edges where
//! raw JSON is parsed or reports are encoded.

use thiserror::Error;

/// Errors that can occur while parsing input or encoding output
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to parse input record: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
