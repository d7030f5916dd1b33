//! Factor scoring
//!
//! Each factor is scored independently by a fixed piecewise rule that reads
//! only its own input field. Bucket boundaries are exact; a value that falls
//! between two buckets drops to the final fallback.

use crate::types::{BmiCategory, Factor, FactorScores, Gender, PredictionInput};

/// Scorer mapping a [`PredictionInput`] to per-factor scores
pub struct FactorScorer;

impl FactorScorer {
    /// Score every factor for the given input
    pub fn score(input: &PredictionInput) -> FactorScores {
        FactorScores::from_fn(|factor| score_factor(factor, input))
    }
}

/// Score a single factor
pub fn score_factor(factor: Factor, input: &PredictionInput) -> f64 {
    match factor {
        Factor::SleepDuration => sleep_duration_score(input.sleep_duration_hours),
        Factor::StressLevel => stress_score(input.stress_level),
        Factor::PhysicalActivity => activity_score(input.physical_activity_minutes),
        Factor::Age => age_score(input.age),
        Factor::Gender => gender_score(&input.gender),
        Factor::BmiCategory => bmi_score(&input.bmi_category),
        Factor::HeartRate => heart_rate_score(input.heart_rate_bpm),
        Factor::DailySteps => steps_score(input.daily_steps),
        Factor::SystolicBp => systolic_score(input.systolic_bp),
        Factor::DiastolicBp => diastolic_score(input.diastolic_bp),
    }
}

/// 7-9 hours is optimal, 6-10 acceptable
pub fn sleep_duration_score(hours: f64) -> f64 {
    if (7.0..=9.0).contains(&hours) {
        2.0
    } else if (6.0..=10.0).contains(&hours) {
        1.0
    } else {
        -1.5
    }
}

/// Linear in stress, lower is better
pub fn stress_score(stress: i32) -> f64 {
    (10.0 - f64::from(stress)) * 0.3
}

pub fn activity_score(minutes: f64) -> f64 {
    if minutes >= 150.0 {
        2.0
    } else if minutes >= 75.0 {
        1.0
    } else if minutes >= 30.0 {
        0.5
    } else {
        -1.0
    }
}

/// Adults score best; anything below 13 (including negative ages) scores lowest
pub fn age_score(age: i32) -> f64 {
    if (18..=64).contains(&age) {
        1.0
    } else if (13..=17).contains(&age) {
        0.5
    } else if age >= 65 {
        -0.5
    } else {
        -1.0
    }
}

pub fn gender_score(gender: &Gender) -> f64 {
    if gender.code() == 1 {
        0.5
    } else {
        -0.5
    }
}

pub fn bmi_score(category: &BmiCategory) -> f64 {
    match category.code() {
        1 => 2.0,
        0 => 0.5,
        2 => -1.0,
        _ => -2.0,
    }
}

pub fn heart_rate_score(bpm: f64) -> f64 {
    if (60.0..=100.0).contains(&bpm) {
        1.5
    } else if (50.0..=110.0).contains(&bpm) {
        0.5
    } else {
        -1.5
    }
}

pub fn steps_score(steps: i64) -> f64 {
    if steps >= 10_000 {
        2.0
    } else if steps >= 7_500 {
        1.0
    } else if steps >= 5_000 {
        0.0
    } else if steps >= 2_500 {
        -1.0
    } else {
        -2.0
    }
}

pub fn systolic_score(mmhg: f64) -> f64 {
    blood_pressure_score(mmhg, (90.0, 120.0), (121.0, 139.0), 140.0)
}

pub fn diastolic_score(mmhg: f64) -> f64 {
    blood_pressure_score(mmhg, (60.0, 80.0), (81.0, 89.0), 90.0)
}

/// Optimal and elevated ranges are both inclusive. Readings in the gaps
/// between them (e.g. 120.5 systolic) score as low pressure.
fn blood_pressure_score(
    mmhg: f64,
    optimal: (f64, f64),
    elevated: (f64, f64),
    high_from: f64,
) -> f64 {
    if (optimal.0..=optimal.1).contains(&mmhg) {
        1.5
    } else if (elevated.0..=elevated.1).contains(&mmhg) {
        0.5
    } else if mmhg >= high_from {
        -2.0
    } else {
        -1.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> PredictionInput {
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
    fn test_sleep_duration_buckets() {
        assert_eq!(sleep_duration_score(7.0), 2.0);
        assert_eq!(sleep_duration_score(9.0), 2.0);
        assert_eq!(sleep_duration_score(6.5), 1.0);
        assert_eq!(sleep_duration_score(6.0), 1.0);
        assert_eq!(sleep_duration_score(9.5), 1.0);
        assert_eq!(sleep_duration_score(10.0), 1.0);
        assert_eq!(sleep_duration_score(5.9), -1.5);
        assert_eq!(sleep_duration_score(10.1), -1.5);
        assert_eq!(sleep_duration_score(f64::NAN), -1.5);
    }

    #[test]
    fn test_stress_is_linear() {
        assert!((stress_score(3) - 2.1).abs() < 1e-9);
        assert_eq!(stress_score(10), 0.0);
        assert!((stress_score(1) - 2.7).abs() < 1e-9);
        // Out of range still scores, just past the ends of the scale
        assert!((stress_score(15) + 1.5).abs() < 1e-9);
        assert!(stress_score(i32::MIN).is_finite());
    }

    #[test]
    fn test_activity_buckets() {
        assert_eq!(activity_score(150.0), 2.0);
        assert_eq!(activity_score(149.9), 1.0);
        assert_eq!(activity_score(75.0), 1.0);
        assert_eq!(activity_score(30.0), 0.5);
        assert_eq!(activity_score(29.0), -1.0);
        assert_eq!(activity_score(-5.0), -1.0);
    }

    #[test]
    fn test_age_buckets() {
        assert_eq!(age_score(18), 1.0);
        assert_eq!(age_score(64), 1.0);
        assert_eq!(age_score(13), 0.5);
        assert_eq!(age_score(17), 0.5);
        assert_eq!(age_score(65), -0.5);
        assert_eq!(age_score(130), -0.5);
        assert_eq!(age_score(12), -1.0);
        assert_eq!(age_score(-3), -1.0);
    }

    #[test]
    fn test_gender_fallback() {
        assert_eq!(gender_score(&Gender::Male), 0.5);
        assert_eq!(gender_score(&Gender::Female), -0.5);
        assert_eq!(gender_score(&Gender::Other), -0.5);
        assert_eq!(gender_score(&Gender::from_label("nonbinary")), -0.5);
    }

    #[test]
    fn test_bmi_categories() {
        assert_eq!(bmi_score(&BmiCategory::Normal), 2.0);
        assert_eq!(bmi_score(&BmiCategory::Underweight), 0.5);
        assert_eq!(bmi_score(&BmiCategory::Overweight), -1.0);
        assert_eq!(bmi_score(&BmiCategory::Obese), -2.0);
        assert_eq!(bmi_score(&BmiCategory::from_label("Unknown")), 2.0);
    }

    #[test]
    fn test_heart_rate_buckets() {
        assert_eq!(heart_rate_score(60.0), 1.5);
        assert_eq!(heart_rate_score(100.0), 1.5);
        assert_eq!(heart_rate_score(50.0), 0.5);
        assert_eq!(heart_rate_score(110.0), 0.5);
        assert_eq!(heart_rate_score(49.0), -1.5);
        assert_eq!(heart_rate_score(111.0), -1.5);
    }

    #[test]
    fn test_steps_buckets() {
        assert_eq!(steps_score(10_000), 2.0);
        assert_eq!(steps_score(9_999), 1.0);
        assert_eq!(steps_score(7_500), 1.0);
        assert_eq!(steps_score(5_000), 0.0);
        assert_eq!(steps_score(4_999), -1.0);
        assert_eq!(steps_score(2_500), -1.0);
        assert_eq!(steps_score(2_499), -2.0);
        assert_eq!(steps_score(-10), -2.0);
    }

    #[test]
    fn test_systolic_buckets() {
        assert_eq!(systolic_score(90.0), 1.5);
        assert_eq!(systolic_score(120.0), 1.5);
        assert_eq!(systolic_score(121.0), 0.5);
        assert_eq!(systolic_score(139.0), 0.5);
        assert_eq!(systolic_score(140.0), -2.0);
        assert_eq!(systolic_score(89.0), -1.5);
        // Gaps between buckets fall through to the low-pressure score
        assert_eq!(systolic_score(120.5), -1.5);
        assert_eq!(systolic_score(139.5), -1.5);
    }

    #[test]
    fn test_diastolic_buckets() {
        assert_eq!(diastolic_score(60.0), 1.5);
        assert_eq!(diastolic_score(80.0), 1.5);
        assert_eq!(diastolic_score(81.0), 0.5);
        assert_eq!(diastolic_score(89.0), 0.5);
        assert_eq!(diastolic_score(90.0), -2.0);
        assert_eq!(diastolic_score(59.0), -1.5);
        assert_eq!(diastolic_score(80.5), -1.5);
    }

    #[test]
    fn test_scorer_reads_each_field() {
        let scores = FactorScorer::score(&scenario_a());
        let expected = [2.0, 2.1, 0.5, 1.0, 0.5, 2.0, 1.5, 1.0, 1.5, 1.5];

        for ((factor, score), want) in scores.iter().zip(expected) {
            assert!(
                (score - want).abs() < 1e-9,
                "{factor}: got {score}, want {want}"
            );
        }
        assert!((scores.total() - 13.6).abs() < 1e-9);
    }
}
