//! Core types for Synheart Slumber
//!
//! This module defines the records that flow through a prediction: the input
//! record, the fixed factor set, per-factor scores and the result record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of factors surfaced in a [`PredictionResult`]
pub const TOP_FACTOR_COUNT: usize = 5;

/// Gender as collected by the presentation layer.
///
/// Labels are matched case-sensitively. Anything other than `Male`, `Female`
/// or `Other` is kept verbatim as [`Gender::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
    Unrecognized(String),
}

impl Gender {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            "Other" => Gender::Other,
            other => Gender::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Unrecognized(label) => label,
        }
    }

    /// Label encoding used by the rule set (Female=0, Male=1).
    ///
    /// Everything that is not `Male` encodes as Female.
    pub fn code(&self) -> u8 {
        match self {
            Gender::Male => 1,
            _ => 0,
        }
    }
}

impl From<String> for Gender {
    fn from(label: String) -> Self {
        Gender::from_label(&label)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.label().to_string()
    }
}

/// BMI category as collected by the presentation layer.
///
/// Unknown labels are kept as [`BmiCategory::Unrecognized`] and score as
/// `Normal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
    Unrecognized(String),
}

impl BmiCategory {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Underweight" => BmiCategory::Underweight,
            "Normal" => BmiCategory::Normal,
            "Overweight" => BmiCategory::Overweight,
            "Obese" => BmiCategory::Obese,
            other => BmiCategory::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
            BmiCategory::Unrecognized(label) => label,
        }
    }

    /// Label encoding used by the rule set
    /// (Underweight=0, Normal=1, Overweight=2, Obese=3).
    pub fn code(&self) -> u8 {
        match self {
            BmiCategory::Underweight => 0,
            BmiCategory::Normal | BmiCategory::Unrecognized(_) => 1,
            BmiCategory::Overweight => 2,
            BmiCategory::Obese => 3,
        }
    }
}

impl From<String> for BmiCategory {
    fn from(label: String) -> Self {
        BmiCategory::from_label(&label)
    }
}

impl From<BmiCategory> for String {
    fn from(category: BmiCategory) -> Self {
        category.label().to_string()
    }
}

/// Lifestyle and physiology inputs for a single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    /// Age in years, expected 0-120
    pub age: i32,
    pub gender: Gender,
    /// Hours of sleep, expected 0-14
    #[serde(alias = "sleepDuration")]
    pub sleep_duration_hours: f64,
    /// Minutes of physical activity per day
    #[serde(alias = "physicalActivity")]
    pub physical_activity_minutes: f64,
    /// Self-reported stress, expected 1-10
    pub stress_level: i32,
    pub bmi_category: BmiCategory,
    /// Resting heart rate (bpm), expected 40-120
    #[serde(alias = "heartRate")]
    pub heart_rate_bpm: f64,
    pub daily_steps: i64,
    /// Systolic blood pressure (mmHg), expected 60-180
    #[serde(rename = "systolicBP", alias = "systolicBloodPressure")]
    pub systolic_bp: f64,
    /// Diastolic blood pressure (mmHg), expected 40-120
    #[serde(rename = "diastolicBP", alias = "diastolicBloodPressure")]
    pub diastolic_bp: f64,
}

/// The fixed set of scored factors, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Factor {
    #[serde(rename = "Sleep Duration")]
    SleepDuration,
    #[serde(rename = "Stress Level")]
    StressLevel,
    #[serde(rename = "Physical Activity")]
    PhysicalActivity,
    #[serde(rename = "Age")]
    Age,
    #[serde(rename = "Gender")]
    Gender,
    #[serde(rename = "BMI Category")]
    BmiCategory,
    #[serde(rename = "Heart Rate")]
    HeartRate,
    #[serde(rename = "Daily Steps")]
    DailySteps,
    #[serde(rename = "Systolic BP")]
    SystolicBp,
    #[serde(rename = "Diastolic BP")]
    DiastolicBp,
}

impl Factor {
    /// Every factor in canonical order
    pub const ALL: [Factor; 10] = [
        Factor::SleepDuration,
        Factor::StressLevel,
        Factor::PhysicalActivity,
        Factor::Age,
        Factor::Gender,
        Factor::BmiCategory,
        Factor::HeartRate,
        Factor::DailySteps,
        Factor::SystolicBp,
        Factor::DiastolicBp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Factor::SleepDuration => "Sleep Duration",
            Factor::StressLevel => "Stress Level",
            Factor::PhysicalActivity => "Physical Activity",
            Factor::Age => "Age",
            Factor::Gender => "Gender",
            Factor::BmiCategory => "BMI Category",
            Factor::HeartRate => "Heart Rate",
            Factor::DailySteps => "Daily Steps",
            Factor::SystolicBp => "Systolic BP",
            Factor::DiastolicBp => "Diastolic BP",
        }
    }

    /// Position in the canonical order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Signed per-factor scores (positive supports good sleep)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    scores: [f64; 10],
}

impl FactorScores {
    pub fn from_fn(score: impl FnMut(Factor) -> f64) -> Self {
        Self {
            scores: Factor::ALL.map(score),
        }
    }

    pub fn get(&self, factor: Factor) -> f64 {
        self.scores[factor.index()]
    }

    /// Scores paired with their factor, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        Factor::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    /// Unweighted sum of all factor scores
    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }
}

/// Binary sleep quality label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepQuality {
    Good,
    Poor,
}

impl SleepQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepQuality::Good => "Good",
            SleepQuality::Poor => "Poor",
        }
    }
}

/// A factor and the magnitude of its influence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorImpact {
    #[serde(rename = "name")]
    pub factor: Factor,
    /// Absolute value of the factor score
    pub impact: f64,
}

/// Output of a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub quality: SleepQuality,
    /// Distance of the probability from 0.5, rescaled to 0-1
    pub confidence: f64,
    /// Most influential factors, highest impact first
    pub factors: [FactorImpact; TOP_FACTOR_COUNT],
}

impl PredictionResult {
    /// Confidence as a whole percentage, rounded half away from zero
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// One-line, human readable verdict
    pub fn summary(&self) -> String {
        let pct = self.confidence_percent();
        match self.quality {
            SleepQuality::Good => format!(
                "Your sleep quality is good ({pct}% confidence). Keep up your healthy routine!"
            ),
            SleepQuality::Poor => format!(
                "Your sleep quality needs improvement ({pct}% confidence). Consider adjusting your habits."
            ),
        }
    }
}
