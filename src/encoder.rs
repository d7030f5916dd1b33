//! Report encoding
//!
//! This module wraps an assessment into a self-describing JSON report: producer
//! metadata, the ranked result, the full 10-factor breakdown and any input
//! warnings.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ComputeError;
use crate::predictor::{assess, Assessment};
use crate::types::{Factor, PredictionInput, PredictionResult, SleepQuality};
use crate::validation::check_input;
use crate::{PRODUCER_NAME, SLUMBER_VERSION};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Producer metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// One factor's contribution to the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub name: Factor,
    /// Signed score, positive supports good sleep
    pub score: f64,
    pub impact: f64,
}

/// Every intermediate value behind a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBreakdown {
    pub overall_score: f64,
    pub probability: f64,
    /// All 10 factors in canonical order
    pub factors: Vec<FactorContribution>,
}

/// Complete prediction report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub input: PredictionInput,
    pub result: PredictionResult,
    pub breakdown: ReportBreakdown,
    pub summary: String,
    pub warnings: Vec<String>,
}

impl PredictionReport {
    pub fn quality(&self) -> SleepQuality {
        self.result.quality
    }
}

/// Report encoder
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Assess the input and build its report
    pub fn encode(&self, input: &PredictionInput) -> PredictionReport {
        let assessment = assess(input);
        self.encode_assessment(input, &assessment)
    }

    /// Build a report from an existing assessment of `input`
    pub fn encode_assessment(
        &self,
        input: &PredictionInput,
        assessment: &Assessment,
    ) -> PredictionReport {
        let producer = ReportProducer {
            name: PRODUCER_NAME.to_string(),
            version: SLUMBER_VERSION.to_string(),
            instance_id: self.instance_id.clone(),
        };

        let factors = assessment
            .scores
            .iter()
            .map(|(name, score)| FactorContribution {
                name,
                score,
                impact: score.abs(),
            })
            .collect();

        let warnings = check_input(input).iter().map(|w| w.to_string()).collect();

        PredictionReport {
            report_version: REPORT_VERSION.to_string(),
            producer,
            computed_at_utc: Utc::now().to_rfc3339(),
            input: input.clone(),
            result: assessment.result.clone(),
            breakdown: ReportBreakdown {
                overall_score: assessment.overall_score,
                probability: assessment.probability,
                factors,
            },
            summary: assessment.result.summary(),
            warnings,
        }
    }

    /// Encode to a pretty-printed JSON string
    pub fn encode_to_json(&self, input: &PredictionInput) -> Result<String, ComputeError> {
        let report = self.encode(input);
        serde_json::to_string_pretty(&report).map_err(|e| ComputeError::EncodingError(e.to_string()))
    }
}

/// Parse a JSON input record and return its full report as JSON
pub fn report_json(raw_json: String) -> Result<String, ComputeError> {
    let input: PredictionInput = serde_json::from_str(&raw_json)?;
    ReportEncoder::new().encode_to_json(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BmiCategory, Gender};
    use pretty_assertions::assert_eq;

    fn make_test_input() -> PredictionInput {
        PredictionInput {
            age: 30,
            gender: Gender::Male,
            sleep_duration_hours: 8.0,
            physical_activity_minutes: 30.0,
            stress_level: 3,
            bmi_category: BmiCategory::Normal,
            heart_rate_bpm: 70.0,
            daily_steps: 8000,
            systolic_bp: 115.0,
            diastolic_bp: 75.0,
        }
    }

    #[test]
    fn test_report_breakdown_covers_all_factors() {
        let encoder = ReportEncoder::with_instance_id("test-instance".to_string());
        let report = encoder.encode(&make_test_input());

        assert_eq!(report.report_version, "1.0.0");
        assert_eq!(report.producer.name, "synheart-slumber");
        assert_eq!(report.producer.instance_id, "test-instance");
        assert_eq!(report.quality(), SleepQuality::Good);
        assert_eq!(report.breakdown.factors.len(), 10);

        let names: Vec<Factor> = report.breakdown.factors.iter().map(|f| f.name).collect();
        assert_eq!(names, Factor::ALL.to_vec());

        let sum: f64 = report.breakdown.factors.iter().map(|f| f.score).sum();
        assert!((sum - report.breakdown.overall_score).abs() < 1e-12);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_report_includes_warnings() {
        let mut input = make_test_input();
        input.bmi_category = BmiCategory::from_label("Unknown");
        input.heart_rate_bpm = 150.0;

        let report = ReportEncoder::new().encode(&input);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].starts_with("bmiCategory"));
        assert!(report.warnings[1].starts_with("heartRateBpm"));
    }

    #[test]
    fn test_encode_to_json_shape() {
        let json = ReportEncoder::new().encode_to_json(&make_test_input()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["result"]["quality"], "Good");
        assert_eq!(value["breakdown"]["factors"][5]["name"], "BMI Category");
        assert_eq!(value["breakdown"]["factors"][5]["score"], 2.0);
        assert_eq!(value["input"]["systolicBP"], 115.0);
        assert!(value["summary"]
            .as_str()
            .unwrap()
            .starts_with("Your sleep quality is good"));
        assert!(chrono::DateTime::parse_from_rfc3339(value["computed_at_utc"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn test_instance_ids_are_unique() {
        let a = ReportEncoder::new().encode(&make_test_input());
        let b = ReportEncoder::new().encode(&make_test_input());
        assert_ne!(a.producer.instance_id, b.producer.instance_id);
    }

    #[test]
    fn test_report_json_round_trip() {
        let json = serde_json::to_string(&make_test_input()).unwrap();
        let report: PredictionReport = serde_json::from_str(&report_json(json).unwrap()).unwrap();
        assert_eq!(report.input, make_test_input());
    }
}
