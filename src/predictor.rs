//! Sleep quality prediction
//!
//! This module provides the public API for Synheart Slumber. A prediction is
//! a single pass over the fixed rule set:
//!
//! 1. FactorScorer - Score each of the 10 factors
//! 2. Aggregate - Sum the scores, all weighted equally
//! 3. Sigmoid - Map the sum to a probability
//! 4. Classify - Good above 0.5, Poor otherwise
//! 5. Rank - Keep the 5 factors with the largest absolute score

use tracing::debug;

use crate::error::ComputeError;
use crate::factors::FactorScorer;
use crate::types::{
    FactorImpact, FactorScores, PredictionInput, PredictionResult, SleepQuality,
    TOP_FACTOR_COUNT,
};

/// Probability above which sleep quality is classified as good
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Full outcome of an assessment, including the factors left out of the
/// ranked result
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub scores: FactorScores,
    /// Unweighted sum of all factor scores
    pub overall_score: f64,
    pub probability: f64,
    pub result: PredictionResult,
}

/// Predict sleep quality for a single input.
///
/// Total over every input: unknown categories and out-of-range numbers are
/// scored through their documented fallbacks.
pub fn predict(input: &PredictionInput) -> PredictionResult {
    assess(input).result
}

/// Run a prediction and keep every intermediate value
pub fn assess(input: &PredictionInput) -> Assessment {
    let scores = FactorScorer::score(input);
    let overall_score = scores.total();
    let probability = sigmoid(overall_score);

    let result = PredictionResult {
        quality: classify(probability),
        confidence: confidence(probability),
        factors: top_factors(&scores),
    };

    debug!(
        overall_score,
        probability,
        quality = result.quality.as_str(),
        "sleep quality assessed"
    );

    Assessment {
        scores,
        overall_score,
        probability,
        result,
    }
}

/// Parse a JSON input record and return the prediction as JSON.
///
/// # Example
/// ```ignore
/// let result_json = predict_json(r#"{"age": 30, "gender": "Male", ...}"#.to_string())?;
/// ```
pub fn predict_json(raw_json: String) -> Result<String, ComputeError> {
    let input: PredictionInput = serde_json::from_str(&raw_json)?;
    Ok(serde_json::to_string(&predict(&input))?)
}

/// Standard logistic function
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Strictly above the threshold is good; exactly 0.5 is poor
pub fn classify(probability: f64) -> SleepQuality {
    if probability > DECISION_THRESHOLD {
        SleepQuality::Good
    } else {
        SleepQuality::Poor
    }
}

/// Distance from the decision boundary, rescaled to 0-1
pub fn confidence(probability: f64) -> f64 {
    (probability - DECISION_THRESHOLD).abs() * 2.0
}

/// Rank factors by absolute score.
///
/// The sort is stable over the canonical factor order, so ties keep that
/// order.
pub fn top_factors(scores: &FactorScores) -> [FactorImpact; TOP_FACTOR_COUNT] {
    let mut ranked: Vec<FactorImpact> = scores
        .iter()
        .map(|(factor, score)| FactorImpact {
            factor,
            impact: score.abs(),
        })
        .collect();

    ranked.sort_by(|a, b| b.impact.total_cmp(&a.impact));

    std::array::from_fn(|i| ranked[i])
}

/// Zero-sized handle for callers that prefer holding a predictor value.
///
/// Carries no state; every call is independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SleepQualityPredictor;

impl SleepQualityPredictor {
    pub fn new() -> Self {
        Self
    }

    pub fn predict(&self, input: &PredictionInput) -> PredictionResult {
        predict(input)
    }

    pub fn assess(&self, input: &PredictionInput) -> Assessment {
        assess(input)
    }
}
