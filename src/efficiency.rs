//! Muscle-gain efficiency scoring
//!
//! Composite 0-1 score from four sub-scores, each clamped to 0-1:
//!
//! | Sub-score   | Formula                                              | Weight |
//! |-------------|------------------------------------------------------|--------|
//! | calorie fit | `1 - abs(balance - anchor) / 500`, anchor -200 above 20% body fat, +300 otherwise | 0.3 |
//! | protein     | `protein_g / 120`                                    | 0.3    |
//! | workout     | `weekly_sessions / 4`                                | 0.2    |
//! | body fat    | `1 - body_fat_percent / 30`                          | 0.2    |
//!
//! Sub-scores saturate: an unbounded input lands on the nearer end of 0-1 and a NaN
//! input scores 0.

use crate::config::EfficiencyConfig;
use crate::guard::{saturate, unit_interval};
use serde::{Deserialize, Serialize};

/// Sub-scores and composite efficiency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyBreakdown {
    pub calorie_fit: f64,
    pub protein: f64,
    pub workout: f64,
    pub body_fat: f64,
    pub composite: f64,
}

/// Score muscle-gain efficiency with the default weights
pub fn score_muscle_gain_efficiency(
    daily_balance: f64,
    protein_g: f64,
    body_fat_percent: f64,
    weekly_sessions: u32,
) -> f64 {
    score_breakdown(
        daily_balance,
        protein_g,
        body_fat_percent,
        weekly_sessions,
        &EfficiencyConfig::default(),
    )
    .composite
}

/// Score muscle-gain efficiency and keep the sub-scores
pub fn score_breakdown(
    daily_balance: f64,
    protein_g: f64,
    body_fat_percent: f64,
    weekly_sessions: u32,
    config: &EfficiencyConfig,
) -> EfficiencyBreakdown {
    let calorie_fit = calorie_fit_score(daily_balance, body_fat_percent, config);
    let protein = protein_score(protein_g, config);
    let workout = workout_score(weekly_sessions, config);
    let body_fat = body_fat_score(body_fat_percent, config);

    let w = &config.weights;
    let composite = unit_interval(
        w.calorie_fit * calorie_fit + w.protein * protein + w.workout * workout + w.body_fat * body_fat,
        "efficiency.composite",
    );

    EfficiencyBreakdown {
        calorie_fit,
        protein,
        workout,
        body_fat,
        composite,
    }
}

/// Closeness of the balance to the cut or bulk anchor
pub fn calorie_fit_score(daily_balance: f64, body_fat_percent: f64, config: &EfficiencyConfig) -> f64 {
    let anchor = if body_fat_percent > config.cut_body_fat_percent {
        config.cut_balance_anchor
    } else {
        config.bulk_balance_anchor
    };
    let distance = (daily_balance - anchor).abs() / config.calorie_fit_scale;
    saturate(1.0 - distance, "efficiency.calorie_fit")
}

pub fn protein_score(protein_g: f64, config: &EfficiencyConfig) -> f64 {
    saturate(protein_g / config.protein_target_g, "efficiency.protein")
}

pub fn workout_score(weekly_sessions: u32, config: &EfficiencyConfig) -> f64 {
    saturate(
        f64::from(weekly_sessions) / config.weekly_session_target,
        "efficiency.workout",
    )
}

pub fn body_fat_score(body_fat_percent: f64, config: &EfficiencyConfig) -> f64 {
    saturate(
        1.0 - body_fat_percent / config.body_fat_scale,
        "efficiency.body_fat",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::daily_balance;

    fn config() -> EfficiencyConfig {
        EfficiencyConfig::default()
    }

    #[test]
    fn test_protein_score_saturates() {
        for grams in [120.0, 240.0, 1200.0, 5000.0, f64::MAX, f64::INFINITY] {
            assert_eq!(protein_score(grams, &config()), 1.0);
        }
        assert!((protein_score(60.0, &config()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_calorie_fit_anchor_switches_on_body_fat() {
        // lean: anchor +300
        assert_eq!(calorie_fit_score(300.0, 15.0, &config()), 1.0);
        assert!((calorie_fit_score(50.0, 15.0, &config()) - 0.5).abs() < 1e-12);
        // above 20%: anchor -200
        assert_eq!(calorie_fit_score(-200.0, 22.0, &config()), 1.0);
        assert_eq!(calorie_fit_score(300.0, 22.0, &config()), 0.0);
        // exactly 20% keeps the bulk anchor
        assert_eq!(calorie_fit_score(300.0, 20.0, &config()), 1.0);
    }

    #[test]
    fn test_workout_score() {
        assert_eq!(workout_score(0, &config()), 0.0);
        assert!((workout_score(2, &config()) - 0.5).abs() < 1e-12);
        assert_eq!(workout_score(7, &config()), 1.0);
    }

    #[test]
    fn test_body_fat_score() {
        assert_eq!(body_fat_score(0.0, &config()), 1.0);
        assert!((body_fat_score(15.0, &config()) - 0.5).abs() < 1e-12);
        assert_eq!(body_fat_score(45.0, &config()), 0.0);
    }

    #[test]
    fn test_composite_weights() {
        // calorie fit 1.0, protein 1.0, workout 0.5, body fat 0.5
        let score = score_muscle_gain_efficiency(300.0, 150.0, 15.0, 2);
        let expected = 0.3 + 0.3 + 0.2 * 0.5 + 0.2 * 0.5;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_inputs_score_one() {
        let score = score_muscle_gain_efficiency(300.0, 200.0, 0.0, 6);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_never_non_finite() {
        let values = [0.0, -1.0, 2000.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, f64::MAX];
        for consumed in values {
            for burned in values {
                for bmr in values {
                    let balance = daily_balance(consumed, burned, bmr);
                    for protein in values {
                        for body_fat in values {
                            let score = score_muscle_gain_efficiency(balance, protein, body_fat, 3);
                            assert!(score.is_finite());
                            assert!((0.0..=1.0).contains(&score));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_nan_inputs_score_zero() {
        assert_eq!(calorie_fit_score(f64::NAN, 15.0, &config()), 0.0);
        assert_eq!(protein_score(f64::NAN, &config()), 0.0);
        assert_eq!(body_fat_score(f64::NAN, &config()), 0.0);
    }

    #[test]
    fn test_unbounded_inputs_saturate() {
        assert_eq!(protein_score(f64::INFINITY, &config()), 1.0);
        assert_eq!(protein_score(f64::NEG_INFINITY, &config()), 0.0);
        assert_eq!(body_fat_score(f64::NEG_INFINITY, &config()), 1.0);
        assert_eq!(body_fat_score(f64::INFINITY, &config()), 0.0);
        // an infinitely distant balance has no fit
        assert_eq!(calorie_fit_score(f64::INFINITY, 15.0, &config()), 0.0);
        assert_eq!(calorie_fit_score(f64::NEG_INFINITY, 22.0, &config()), 0.0);

        let score = score_muscle_gain_efficiency(300.0, f64::INFINITY, 0.0, 4);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_breakdown_matches_composite() {
        let b = score_breakdown(100.0, 90.0, 18.0, 3, &config());
        let w = config().weights;
        let expected = w.calorie_fit * b.calorie_fit
            + w.protein * b.protein
            + w.workout * b.workout
            + w.body_fat * b.body_fat;
        assert!((b.composite - expected).abs() < 1e-12);
    }
}
