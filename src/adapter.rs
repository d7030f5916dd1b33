//! Input record adapters
//!
//! This module turns raw JSON into [`PredictionInput`] records. Two shapes are
//! supported:
//! - the prediction record itself ([`InputAdapter`])
//! - the form submission collected by the front-end ([`FormAdapter`]), whose
//!   optional fields are filled with the form's defaults

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ComputeError;
use crate::types::{BmiCategory, Gender, PredictionInput};

/// Heart rate assumed when the form omits it (bpm)
pub const DEFAULT_HEART_RATE_BPM: f64 = 70.0;
/// Daily steps assumed when the form omits them
pub const DEFAULT_DAILY_STEPS: i64 = 5000;
/// Systolic pressure assumed when the form omits it (mmHg)
pub const DEFAULT_SYSTOLIC_BP: f64 = 120.0;
/// Diastolic pressure assumed when the form omits it (mmHg)
pub const DEFAULT_DIASTOLIC_BP: f64 = 80.0;

/// Trait for adapters that map a raw JSON record to a prediction input
pub trait RecordAdapter {
    /// Wire shape of one record
    type Record: DeserializeOwned;

    /// Map a parsed record to a prediction input
    fn to_input(&self, record: Self::Record) -> PredictionInput;

    /// Parse a single JSON object
    fn parse(&self, raw_json: &str) -> Result<PredictionInput, ComputeError> {
        let record: Self::Record = serde_json::from_str(raw_json)?;
        Ok(self.to_input(record))
    }

    /// Parse a JSON array of records
    fn parse_array(&self, json: &str) -> Result<Vec<PredictionInput>, ComputeError> {
        let records: Vec<Self::Record> = serde_json::from_str(json)?;
        Ok(records.into_iter().map(|r| self.to_input(r)).collect())
    }

    /// Parse NDJSON (newline-delimited JSON), skipping blank lines
    fn parse_ndjson(&self, ndjson: &str) -> Result<Vec<PredictionInput>, ComputeError> {
        let mut inputs = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            match serde_json::from_str::<Self::Record>(trimmed) {
                Ok(record) => inputs.push(self.to_input(record)),
                Err(e) => {
                    return Err(ComputeError::ParseError(format!(
                        "Failed to parse line {}: {}",
                        line_num + 1,
                        e
                    )));
                }
            }
        }
        Ok(inputs)
    }
}

/// Adapter for records already in [`PredictionInput`] shape
pub struct InputAdapter;

impl RecordAdapter for InputAdapter {
    type Record = PredictionInput;

    fn to_input(&self, record: PredictionInput) -> PredictionInput {
        record
    }
}

/// Raw form submission as collected by the front-end.
///
/// Fields the rule set does not use (caffeine intake, screen time, work
/// hours) are ignored on parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub age: i32,
    /// Form value: `male`, `female` or `other`
    pub gender: String,
    pub sleep_duration: f64,
    pub physical_activity: f64,
    pub stress_level: i32,
    #[serde(default)]
    pub bmi_category: Option<String>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub daily_steps: Option<i64>,
    #[serde(default, rename = "systolicBP")]
    pub systolic_bp: Option<f64>,
    #[serde(default, rename = "diastolicBP")]
    pub diastolic_bp: Option<f64>,
}

impl FormSubmission {
    /// Map the form onto a prediction input.
    ///
    /// `male` (any case) maps to Male and every other form value to Female.
    /// Missing optional fields take the form defaults.
    pub fn into_input(self) -> PredictionInput {
        let gender = if self.gender.eq_ignore_ascii_case("male") {
            Gender::Male
        } else {
            Gender::Female
        };

        let bmi_category = match self.bmi_category {
            Some(label) => BmiCategory::from(label),
            None => {
                debug!("bmi category missing, defaulting to Normal");
                BmiCategory::Normal
            }
        };

        PredictionInput {
            age: self.age,
            gender,
            sleep_duration_hours: self.sleep_duration,
            physical_activity_minutes: self.physical_activity,
            stress_level: self.stress_level,
            bmi_category,
            heart_rate_bpm: self.heart_rate.unwrap_or(DEFAULT_HEART_RATE_BPM),
            daily_steps: self.daily_steps.unwrap_or(DEFAULT_DAILY_STEPS),
            systolic_bp: self.systolic_bp.unwrap_or(DEFAULT_SYSTOLIC_BP),
            diastolic_bp: self.diastolic_bp.unwrap_or(DEFAULT_DIASTOLIC_BP),
        }
    }
}

impl From<FormSubmission> for PredictionInput {
    fn from(form: FormSubmission) -> Self {
        form.into_input()
    }
}

/// Adapter for front-end form submissions
pub struct FormAdapter;

impl RecordAdapter for FormAdapter {
    type Record = FormSubmission;

    fn to_input(&self, record: FormSubmission) -> PredictionInput {
        record.into_input()
    }
}

/// Parse a form submission JSON object into a prediction input
pub fn parse_form(raw_json: &str) -> Result<PredictionInput, ComputeError> {
    FormAdapter.parse(raw_json)
}
