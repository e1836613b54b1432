//! Strength-training recommendations
//!
//! Turns a muscle-gain efficiency score and a weekly workout summary into a
//! target session frequency, a muscle-gain outlook, a time-to-goal estimate and
//! an ordered list of training advice.

use crate::config::{MonthlyGainTable, StrengthConfig, TrainingAdviceThresholds};
use crate::guard::finite_or_zero;
use crate::types::{MuscleGainPrediction, WorkoutKind, WorkoutRecord, WorkoutSummary};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of the workout summary window
pub const SUMMARY_WINDOW_DAYS: i64 = 7;

/// One training advice item, appended in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingAdvice {
    IncreaseFrequency,
    ReduceForRecovery,
    ExtendSession,
    ShortenSession,
    ReduceBodyFatFirst,
    RaiseIntensity,
    MaintainPace,
}

/// Everything the recommender produces for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthRecommendation {
    pub current_frequency: u32,
    pub recommended_frequency: u32,
    pub prediction: MuscleGainPrediction,
    pub monthly_gain_kg: f64,
    /// None when no muscle-mass target was supplied
    pub months_to_goal: Option<u32>,
    pub advice: Vec<TrainingAdvice>,
}

impl WorkoutSummary {
    /// Summarize strength sessions started in the 7 days ending at `window_end`
    pub fn from_records(records: &[WorkoutRecord], window_end: DateTime<Utc>) -> Self {
        let window_start = window_end - Duration::days(SUMMARY_WINDOW_DAYS);

        let durations: Vec<f64> = records
            .iter()
            .filter(|r| r.kind == WorkoutKind::Strength)
            .filter(|r| r.start > window_start && r.start <= window_end)
            .map(|r| r.duration_seconds)
            .collect();

        if durations.is_empty() {
            return Self::default();
        }

        let total: f64 = durations.iter().sum();
        Self {
            weekly_sessions: durations.len() as u32,
            average_duration_seconds: finite_or_zero(
                total / durations.len() as f64,
                "workout_summary.average_duration",
            ),
        }
    }

    pub fn average_duration_minutes(&self) -> f64 {
        self.average_duration_seconds / 60.0
    }
}

/// Recommended weekly strength sessions.
///
/// Body fat is accepted but no frequency rule depends on it.
pub fn recommend_frequency(current_frequency: u32, efficiency: f64, body_fat_percent: f64) -> u32 {
    recommend_frequency_with(
        current_frequency,
        efficiency,
        body_fat_percent,
        &StrengthConfig::default(),
    )
}

pub fn recommend_frequency_with(
    current_frequency: u32,
    efficiency: f64,
    _body_fat_percent: f64,
    config: &StrengthConfig,
) -> u32 {
    let efficiency = finite_or_zero(efficiency, "recommend_frequency.efficiency");

    if efficiency < config.low_efficiency_below {
        config
            .low_efficiency_min_sessions
            .max(current_frequency.saturating_add(1))
    } else if efficiency > config.high_efficiency_above {
        current_frequency
    } else {
        config.min_sessions.max(current_frequency)
    }
}

/// Muscle-gain outlook bucket for an efficiency score
pub fn predict_muscle_gain(efficiency: f64) -> MuscleGainPrediction {
    predict_muscle_gain_with(efficiency, &StrengthConfig::default())
}

pub fn predict_muscle_gain_with(efficiency: f64, config: &StrengthConfig) -> MuscleGainPrediction {
    let efficiency = finite_or_zero(efficiency, "predict_muscle_gain.efficiency");

    if efficiency >= config.excellent_from {
        MuscleGainPrediction::Excellent
    } else if efficiency >= config.high_from {
        MuscleGainPrediction::High
    } else if efficiency >= config.moderate_from {
        MuscleGainPrediction::Moderate
    } else {
        MuscleGainPrediction::Low
    }
}

/// Expected monthly lean-mass gain (kg) for a prediction bucket
pub fn monthly_gain_kg(prediction: MuscleGainPrediction) -> f64 {
    MonthlyGainTable::default().for_prediction(prediction)
}

/// Whole months needed to reach `target_kg` from `current_kg`.
///
/// Returns 0 when the model cannot reach the goal (non-positive monthly gain),
/// when the goal is already reached, or when the result is not finite.
pub fn time_to_goal_months(current_kg: f64, target_kg: f64, monthly_gain_kg: f64) -> u32 {
    if monthly_gain_kg.is_nan() || monthly_gain_kg <= 0.0 {
        return 0;
    }

    let months = finite_or_zero(
        ((target_kg - current_kg) / monthly_gain_kg).ceil(),
        "time_to_goal_months",
    );
    if months <= 0.0 {
        return 0;
    }
    months as u32
}

/// Ordered training advice
pub fn training_advice(
    summary: &WorkoutSummary,
    efficiency: f64,
    body_fat_percent: f64,
    thresholds: &TrainingAdviceThresholds,
) -> Vec<TrainingAdvice> {
    let mut advice = Vec::new();
    let minutes = summary.average_duration_minutes();

    if summary.weekly_sessions < thresholds.min_weekly_sessions {
        advice.push(TrainingAdvice::IncreaseFrequency);
    }
    if summary.weekly_sessions > thresholds.max_weekly_sessions {
        advice.push(TrainingAdvice::ReduceForRecovery);
    }
    if minutes < thresholds.min_session_minutes {
        advice.push(TrainingAdvice::ExtendSession);
    }
    if minutes > thresholds.max_session_minutes {
        advice.push(TrainingAdvice::ShortenSession);
    }
    if body_fat_percent > thresholds.high_body_fat_percent {
        advice.push(TrainingAdvice::ReduceBodyFatFirst);
    }
    if efficiency < thresholds.low_efficiency_below {
        advice.push(TrainingAdvice::RaiseIntensity);
    }
    if efficiency > thresholds.high_efficiency_above {
        advice.push(TrainingAdvice::MaintainPace);
    }

    advice
}

/// Build the full strength recommendation
pub fn recommend(
    summary: &WorkoutSummary,
    efficiency: f64,
    body_fat_percent: f64,
    muscle_goal: Option<(f64, f64)>,
    config: &StrengthConfig,
) -> StrengthRecommendation {
    let efficiency = finite_or_zero(efficiency, "strength.efficiency");
    let prediction = predict_muscle_gain_with(efficiency, config);
    let monthly_gain_kg = config.monthly_gain_kg.for_prediction(prediction);

    StrengthRecommendation {
        current_frequency: summary.weekly_sessions,
        recommended_frequency: recommend_frequency_with(
            summary.weekly_sessions,
            efficiency,
            body_fat_percent,
            config,
        ),
        prediction,
        monthly_gain_kg,
        months_to_goal: muscle_goal
            .map(|(current, target)| time_to_goal_months(current, target, monthly_gain_kg)),
        advice: training_advice(summary, efficiency, body_fat_percent, &config.advice),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn workout(day: u32, minutes: f64, kind: WorkoutKind) -> WorkoutRecord {
        WorkoutRecord {
            start: Utc.with_ymd_and_hms(2024, 3, day, 18, 0, 0).unwrap(),
            duration_seconds: minutes * 60.0,
            calories_burned: minutes * 7.0,
            kind,
        }
    }

    #[test]
    fn test_recommend_frequency_low_efficiency() {
        assert_eq!(recommend_frequency(0, 0.2, 18.0), 3);
        assert_eq!(recommend_frequency(2, 0.2, 18.0), 3);
        assert_eq!(recommend_frequency(4, 0.29, 18.0), 5);
    }

    #[test]
    fn test_recommend_frequency_high_efficiency_unchanged() {
        assert_eq!(recommend_frequency(1, 0.71, 18.0), 1);
        assert_eq!(recommend_frequency(6, 0.95, 18.0), 6);
    }

    #[test]
    fn test_recommend_frequency_middle_band() {
        assert_eq!(recommend_frequency(0, 0.5, 18.0), 2);
        assert_eq!(recommend_frequency(4, 0.3, 18.0), 4);
        assert_eq!(recommend_frequency(1, 0.7, 18.0), 2);
    }

    #[test]
    fn test_recommend_frequency_ignores_body_fat() {
        for body_fat in [5.0, 18.0, 35.0, f64::NAN] {
            assert_eq!(recommend_frequency(2, 0.2, body_fat), 3);
            assert_eq!(recommend_frequency(4, 0.5, body_fat), 4);
        }
    }

    #[test]
    fn test_prediction_buckets() {
        assert_eq!(predict_muscle_gain(0.8), MuscleGainPrediction::Excellent);
        assert_eq!(predict_muscle_gain(0.79), MuscleGainPrediction::High);
        assert_eq!(predict_muscle_gain(0.6), MuscleGainPrediction::High);
        assert_eq!(predict_muscle_gain(0.4), MuscleGainPrediction::Moderate);
        assert_eq!(predict_muscle_gain(0.39), MuscleGainPrediction::Low);
        assert_eq!(predict_muscle_gain(f64::NAN), MuscleGainPrediction::Low);
    }

    #[test]
    fn test_monthly_gain_constants() {
        assert_eq!(monthly_gain_kg(MuscleGainPrediction::Low), 0.2);
        assert_eq!(monthly_gain_kg(MuscleGainPrediction::Moderate), 0.5);
        assert_eq!(monthly_gain_kg(MuscleGainPrediction::High), 0.8);
        assert_eq!(monthly_gain_kg(MuscleGainPrediction::Excellent), 1.2);
    }

    #[test]
    fn test_time_to_goal() {
        assert_eq!(time_to_goal_months(45.0, 50.0, 0.5), 10);
        assert_eq!(time_to_goal_months(45.0, 50.0, 0.8), 7);
        assert_eq!(time_to_goal_months(45.0, 50.0, 0.0), 0);
        assert_eq!(time_to_goal_months(45.0, 50.0, -1.0), 0);
        assert_eq!(time_to_goal_months(52.0, 50.0, 0.5), 0);
        assert_eq!(time_to_goal_months(45.0, f64::INFINITY, 0.5), 0);
        assert_eq!(time_to_goal_months(45.0, 50.0, f64::NAN), 0);
    }

    #[test]
    fn test_summary_from_records() {
        let records = vec![
            workout(1, 45.0, WorkoutKind::Strength), // outside the window
            workout(4, 60.0, WorkoutKind::Strength),
            workout(5, 30.0, WorkoutKind::Cardio),
            workout(6, 40.0, WorkoutKind::Strength),
            workout(8, 50.0, WorkoutKind::Strength),
        ];
        let end = Utc.with_ymd_and_hms(2024, 3, 8, 23, 59, 59).unwrap();
        let summary = WorkoutSummary::from_records(&records, end);

        assert_eq!(summary.weekly_sessions, 3);
        assert!((summary.average_duration_minutes() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_empty() {
        let summary = WorkoutSummary::from_records(&[], Utc::now());
        assert_eq!(summary, WorkoutSummary::default());
    }

    #[test]
    fn test_advice_order() {
        let summary = WorkoutSummary {
            weekly_sessions: 2,
            average_duration_seconds: 20.0 * 60.0,
        };
        let advice = training_advice(&summary, 0.2, 28.0, &TrainingAdviceThresholds::default());

        assert_eq!(
            advice,
            vec![
                TrainingAdvice::IncreaseFrequency,
                TrainingAdvice::ExtendSession,
                TrainingAdvice::ReduceBodyFatFirst,
                TrainingAdvice::RaiseIntensity,
            ]
        );
    }

    #[test]
    fn test_advice_overtraining() {
        let summary = WorkoutSummary {
            weekly_sessions: 6,
            average_duration_seconds: 100.0 * 60.0,
        };
        let advice = training_advice(&summary, 0.8, 12.0, &TrainingAdviceThresholds::default());

        assert_eq!(
            advice,
            vec![
                TrainingAdvice::ReduceForRecovery,
                TrainingAdvice::ShortenSession,
                TrainingAdvice::MaintainPace,
            ]
        );
    }

    #[test]
    fn test_advice_in_range_is_empty() {
        let summary = WorkoutSummary {
            weekly_sessions: 4,
            average_duration_seconds: 60.0 * 60.0,
        };
        assert!(training_advice(&summary, 0.5, 15.0, &TrainingAdviceThresholds::default()).is_empty());
    }

    #[test]
    fn test_recommend_bundle() {
        let summary = WorkoutSummary {
            weekly_sessions: 4,
            average_duration_seconds: 3600.0,
        };
        let rec = recommend(&summary, 0.65, 15.0, Some((45.0, 50.0)), &StrengthConfig::default());

        assert_eq!(rec.prediction, MuscleGainPrediction::High);
        assert_eq!(rec.monthly_gain_kg, 0.8);
        assert_eq!(rec.months_to_goal, Some(7));
        assert_eq!(rec.recommended_frequency, 4);
        assert!(rec.advice.is_empty());
    }
}
