//! Input range checks
//!
//! The predictor scores any input it is given. These checks let callers see
//! which values sit outside the documented domains before trusting a result.
//! They never change the prediction.

use serde::Serialize;

use crate::types::{BmiCategory, Gender, PredictionInput};

/// A value outside its documented domain
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputWarning {
    #[error("{field} is {value}, expected {min} to {max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} is {value}, expected at least {min}")]
    BelowMinimum {
        field: &'static str,
        value: f64,
        min: f64,
    },

    #[error("{field} value {label:?} is not recognized, scoring as {fallback}")]
    UnrecognizedCategory {
        field: &'static str,
        label: String,
        fallback: &'static str,
    },
}

/// Check every field of an input against its documented domain
pub fn check_input(input: &PredictionInput) -> Vec<InputWarning> {
    let mut warnings = Vec::new();

    check_range(&mut warnings, "age", f64::from(input.age), 0.0, 120.0);
    if let Gender::Unrecognized(label) = &input.gender {
        warnings.push(InputWarning::UnrecognizedCategory {
            field: "gender",
            label: label.clone(),
            fallback: "Female",
        });
    }
    check_range(
        &mut warnings,
        "sleepDurationHours",
        input.sleep_duration_hours,
        0.0,
        14.0,
    );
    check_minimum(
        &mut warnings,
        "physicalActivityMinutes",
        input.physical_activity_minutes,
        0.0,
    );
    check_range(
        &mut warnings,
        "stressLevel",
        f64::from(input.stress_level),
        1.0,
        10.0,
    );
    if let BmiCategory::Unrecognized(label) = &input.bmi_category {
        warnings.push(InputWarning::UnrecognizedCategory {
            field: "bmiCategory",
            label: label.clone(),
            fallback: "Normal",
        });
    }
    check_range(&mut warnings, "heartRateBpm", input.heart_rate_bpm, 40.0, 120.0);
    check_minimum(&mut warnings, "dailySteps", input.daily_steps as f64, 0.0);
    check_range(&mut warnings, "systolicBP", input.systolic_bp, 60.0, 180.0);
    check_range(&mut warnings, "diastolicBP", input.diastolic_bp, 40.0, 120.0);

    warnings
}

fn check_range(
    warnings: &mut Vec<InputWarning>,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) {
    // NaN fails the containment test and is reported too
    if !(min..=max).contains(&value) {
        warnings.push(InputWarning::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
}

fn check_minimum(warnings: &mut Vec<InputWarning>, field: &'static str, value: f64, min: f64) {
    if value.is_nan() || value < min {
        warnings.push(InputWarning::BelowMinimum { field, value, min });
    }
}
