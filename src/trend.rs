//! Historical trend analysis
//!
//! Rebuilds one record per calendar day over a trailing window by joining the
//! same-day subsets of the workout, nutrition and body-composition series. Days
//! without nutrition samples assume the default intake (2000 kcal); days without
//! body-composition samples assume the default body fat (20%).
//!
//! Each day gets a workout intensity and two efficiency variants:
//!
//! - muscle gain: `0.6 * calorie_fit(surplus, 300) + 0.4 * intensity_fit(0.75)`
//! - fat loss: `0.7 * calorie_fit(deficit, 500) + 0.3 * intensity_fit(0.65)`
//!
//! The top muscle-gain days drive the optimal surplus and intensity
//! recommendations; window averages drive the monthly predictions.
//!
//! Each day also carries its protein total and body fat (with the 20% default)
//! for charting. Neither feeds the day's efficiency variants.

use crate::config::{EfficiencyVariant, TrendConfig, MAX_TREND_WINDOW_DAYS};
use crate::guard::{finite_or_zero, mean, safe_ratio, unit_interval};
use crate::types::{BodyCompositionSample, NutritionSample, WorkoutRecord};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Raw series the trend analyzer joins by calendar day
#[derive(Debug, Clone, Copy)]
pub struct TrendSeries<'a> {
    pub workouts: &'a [WorkoutRecord],
    pub nutrition: &'a [NutritionSample],
    pub body_composition: &'a [BodyCompositionSample],
}

/// One reconstructed and scored day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendDay {
    pub date: NaiveDate,
    /// Calories eaten (kcal)
    pub intake_kcal: f64,
    /// Calories burned in workouts (kcal)
    pub burned_kcal: f64,
    pub workout_seconds: f64,
    /// Charting only; not scored
    pub protein_g: f64,
    /// Charting only; not scored
    pub body_fat_percent: f64,
    /// Intake fell back to the default
    pub intake_estimated: bool,
    /// Body fat fell back to the default
    pub body_fat_estimated: bool,
    /// `intake - (burned + BMR)` (kcal)
    pub surplus_kcal: f64,
    /// Workout intensity (0-1)
    pub intensity: f64,
    pub muscle_gain_efficiency: f64,
    pub fat_loss_efficiency: f64,
}

/// Aggregated trend over the window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub days: Vec<TrendDay>,
    /// Mean surplus of the best muscle-gain days (kcal)
    pub optimal_calorie_surplus: f64,
    /// Mean intensity of the best muscle-gain days (0-1)
    pub optimal_workout_intensity: f64,
    /// Mean muscle-gain efficiency across the window (0-1)
    pub overall_efficiency: f64,
    /// Mean fat-loss efficiency across the window (0-1)
    pub fat_loss_efficiency: f64,
    pub predicted_monthly_gain_kg: f64,
    pub predicted_monthly_fat_loss_kg: f64,
    pub estimated_intake_days: usize,
    pub estimated_body_fat_days: usize,
}

/// Trend analyzer over a trailing window of days
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// Analyze the `config.window_days` days ending at `window_end` (inclusive)
    pub fn analyze(
        series: TrendSeries<'_>,
        window_end: NaiveDate,
        bmr: f64,
        config: &TrendConfig,
    ) -> TrendAnalysis {
        let days = Self::reconstruct(series, window_end, bmr, config);
        let window_start = days.first().map(|d| d.date).unwrap_or(window_end);

        if days.is_empty() {
            warn!(%window_end, "trend window is empty");
        }

        let estimated_intake_days = days.iter().filter(|d| d.intake_estimated).count();
        let estimated_body_fat_days = days.iter().filter(|d| d.body_fat_estimated).count();
        debug!(
            days = days.len(),
            estimated_intake_days, estimated_body_fat_days, "reconstructed trend window"
        );

        let best = top_days(&days, config.top_days);
        let optimal_calorie_surplus = finite_or_zero(
            mean(&best.iter().map(|d| d.surplus_kcal).collect::<Vec<_>>()),
            "trend.optimal_calorie_surplus",
        );
        let optimal_workout_intensity = unit_interval(
            mean(&best.iter().map(|d| d.intensity).collect::<Vec<_>>()),
            "trend.optimal_workout_intensity",
        );

        let overall_efficiency = unit_interval(
            mean(&days.iter().map(|d| d.muscle_gain_efficiency).collect::<Vec<_>>()),
            "trend.overall_efficiency",
        );
        let fat_loss_efficiency = unit_interval(
            mean(&days.iter().map(|d| d.fat_loss_efficiency).collect::<Vec<_>>()),
            "trend.fat_loss_efficiency",
        );

        TrendAnalysis {
            window_start,
            window_end,
            optimal_calorie_surplus,
            optimal_workout_intensity,
            overall_efficiency,
            fat_loss_efficiency,
            predicted_monthly_gain_kg: finite_or_zero(
                overall_efficiency * config.muscle_gain.monthly_baseline_kg,
                "trend.predicted_monthly_gain",
            ),
            predicted_monthly_fat_loss_kg: finite_or_zero(
                fat_loss_efficiency * config.fat_loss.monthly_baseline_kg,
                "trend.predicted_monthly_fat_loss",
            ),
            estimated_intake_days,
            estimated_body_fat_days,
            days,
        }
    }

    /// Rebuild and score one record per day, oldest first
    pub fn reconstruct(
        series: TrendSeries<'_>,
        window_end: NaiveDate,
        bmr: f64,
        config: &TrendConfig,
    ) -> Vec<TrendDay> {
        let window_days = if config.window_days > MAX_TREND_WINDOW_DAYS {
            warn!(
                requested = config.window_days,
                max = MAX_TREND_WINDOW_DAYS,
                "trend window capped"
            );
            MAX_TREND_WINDOW_DAYS
        } else {
            config.window_days
        };

        (0..u64::from(window_days))
            .rev()
            .filter_map(|offset| window_end.checked_sub_days(Days::new(offset)))
            .map(|date| Self::build_day(series, date, bmr, config))
            .collect()
    }

    fn build_day(series: TrendSeries<'_>, date: NaiveDate, bmr: f64, config: &TrendConfig) -> TrendDay {
        let workouts: Vec<&WorkoutRecord> = series
            .workouts
            .iter()
            .filter(|w| w.start.date_naive() == date)
            .collect();
        let meals: Vec<&NutritionSample> = series
            .nutrition
            .iter()
            .filter(|n| n.timestamp.date_naive() == date)
            .collect();
        let body_fat_sample = series
            .body_composition
            .iter()
            .filter(|b| b.timestamp.date_naive() == date)
            .max_by_key(|b| b.timestamp);

        let burned_kcal: f64 = workouts.iter().map(|w| w.calories_burned).sum();
        let workout_seconds: f64 = workouts.iter().map(|w| w.duration_seconds).sum();

        let intake_estimated = meals.is_empty();
        let intake_kcal = if intake_estimated {
            config.default_intake_kcal
        } else {
            meals.iter().map(|m| m.calories).sum()
        };
        let protein_g: f64 = meals.iter().map(|m| m.protein_g).sum();

        let body_fat_estimated = body_fat_sample.is_none();
        let body_fat_percent = body_fat_sample
            .map(|b| b.body_fat_percent)
            .unwrap_or(config.default_body_fat_percent);

        if intake_estimated || body_fat_estimated {
            debug!(%date, intake_estimated, body_fat_estimated, "trend day uses defaults");
        }

        let surplus_kcal = finite_or_zero(intake_kcal - (burned_kcal + bmr), "trend.surplus");
        let intensity = workout_intensity(burned_kcal, workout_seconds, config);

        TrendDay {
            date,
            intake_kcal,
            burned_kcal,
            workout_seconds,
            protein_g,
            body_fat_percent,
            intake_estimated,
            body_fat_estimated,
            surplus_kcal,
            intensity,
            muscle_gain_efficiency: variant_efficiency(surplus_kcal, intensity, &config.muscle_gain),
            fat_loss_efficiency: variant_efficiency(-surplus_kcal, intensity, &config.fat_loss),
        }
    }
}

/// Workout intensity: burn rate relative to the maximal rate, 0 without training time
pub fn workout_intensity(burned_kcal: f64, workout_seconds: f64, config: &TrendConfig) -> f64 {
    let hours = workout_seconds / 3600.0;
    if hours <= 0.0 {
        return 0.0;
    }
    unit_interval(
        safe_ratio(burned_kcal, hours * config.max_intensity_kcal_per_hour, "trend.intensity"),
        "trend.intensity",
    )
}

/// Weighted calorie-fit and intensity-fit score for one variant.
///
/// `calorie_kcal` is the surplus for muscle gain and the deficit for fat loss.
pub fn variant_efficiency(calorie_kcal: f64, intensity: f64, variant: &EfficiencyVariant) -> f64 {
    let calorie_fit = unit_interval(
        1.0 - safe_ratio(
            (calorie_kcal - variant.calorie_anchor).abs(),
            variant.calorie_scale,
            "trend.calorie_fit",
        ),
        "trend.calorie_fit",
    );
    let intensity_fit = unit_interval(
        1.0 - safe_ratio(
            (intensity - variant.intensity_anchor).abs(),
            variant.intensity_anchor,
            "trend.intensity_fit",
        ),
        "trend.intensity_fit",
    );

    unit_interval(
        variant.calorie_weight * calorie_fit + variant.intensity_weight * intensity_fit,
        "trend.variant_efficiency",
    )
}

/// Highest muscle-gain days; ties keep chronological order
fn top_days(days: &[TrendDay], count: usize) -> Vec<&TrendDay> {
    let mut ranked: Vec<&TrendDay> = days.iter().collect();
    ranked.sort_by(|a, b| {
        b.muscle_gain_efficiency
            .partial_cmp(&a.muscle_gain_efficiency)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(count);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WorkoutKind;
    use chrono::{TimeZone, Utc};

    const BMR: f64 = 1600.0;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn workout(day: u32, minutes: f64, calories: f64) -> WorkoutRecord {
        WorkoutRecord {
            start: Utc.with_ymd_and_hms(2024, 3, day, 18, 0, 0).unwrap(),
            duration_seconds: minutes * 60.0,
            calories_burned: calories,
            kind: WorkoutKind::Strength,
        }
    }

    fn meal(day: u32, hour: u32, calories: f64, protein: f64) -> NutritionSample {
        NutritionSample {
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
            calories,
            protein_g: protein,
            carbs_g: 0.0,
            fat_g: 0.0,
        }
    }

    fn body(day: u32, hour: u32, body_fat: f64) -> BodyCompositionSample {
        BodyCompositionSample {
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
            body_fat_percent: body_fat,
            weight_kg: Some(75.0),
            muscle_mass_kg: None,
        }
    }

    fn config(window_days: u32) -> TrendConfig {
        TrendConfig {
            window_days,
            ..Default::default()
        }
    }

    #[test]
    fn test_intensity() {
        let c = TrendConfig::default();
        // 400 kcal in 1 hour = 0.5 of 800 kcal/h
        assert!((workout_intensity(400.0, 3600.0, &c) - 0.5).abs() < 1e-12);
        assert_eq!(workout_intensity(2000.0, 3600.0, &c), 1.0);
        assert_eq!(workout_intensity(400.0, 0.0, &c), 0.0);
    }

    #[test]
    fn test_variant_efficiency_at_anchors() {
        let c = TrendConfig::default();
        assert!((variant_efficiency(300.0, 0.75, &c.muscle_gain) - 1.0).abs() < 1e-12);
        assert!((variant_efficiency(500.0, 0.65, &c.fat_loss) - 1.0).abs() < 1e-12);
        // no training: only the calorie part counts
        assert!((variant_efficiency(300.0, 0.0, &c.muscle_gain) - 0.6).abs() < 1e-12);
        assert!((variant_efficiency(500.0, 0.0, &c.fat_loss) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_reconstruct_defaults() {
        let series = TrendSeries {
            workouts: &[],
            nutrition: &[],
            body_composition: &[],
        };
        let days = TrendAnalyzer::reconstruct(series, date(10), BMR, &config(3));

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, date(8));
        assert_eq!(days[2].date, date(10));
        for day in &days {
            assert!(day.intake_estimated && day.body_fat_estimated);
            assert_eq!(day.intake_kcal, 2000.0);
            assert_eq!(day.body_fat_percent, 20.0);
            assert_eq!(day.surplus_kcal, 400.0);
            assert_eq!(day.intensity, 0.0);
        }
    }

    #[test]
    fn test_reconstruct_joins_same_day_samples() {
        let workouts = vec![workout(9, 60.0, 500.0), workout(9, 30.0, 100.0), workout(1, 60.0, 999.0)];
        let nutrition = vec![meal(9, 8, 700.0, 40.0), meal(9, 13, 900.0, 50.0), meal(10, 8, 600.0, 30.0)];
        let body_composition = vec![body(9, 7, 19.0), body(9, 21, 18.5)];
        let series = TrendSeries {
            workouts: &workouts,
            nutrition: &nutrition,
            body_composition: &body_composition,
        };

        let days = TrendAnalyzer::reconstruct(series, date(10), BMR, &config(2));
        let day9 = &days[0];

        assert_eq!(day9.burned_kcal, 600.0);
        assert_eq!(day9.workout_seconds, 5400.0);
        assert_eq!(day9.intake_kcal, 1600.0);
        assert_eq!(day9.protein_g, 90.0);
        assert_eq!(day9.body_fat_percent, 18.5);
        assert!(!day9.intake_estimated && !day9.body_fat_estimated);
        assert_eq!(day9.surplus_kcal, 1600.0 - (600.0 + BMR));
        // 600 kcal over 1.5 h against 800 kcal/h
        assert!((day9.intensity - 0.5).abs() < 1e-12);

        let day10 = &days[1];
        assert_eq!(day10.intake_kcal, 600.0);
        assert!(day10.body_fat_estimated);
    }

    #[test]
    fn test_analyze_top_days_and_predictions() {
        // Days 1-5 hit the muscle-gain anchors exactly; days 6-10 are defaults.
        let mut workouts = Vec::new();
        let mut nutrition = Vec::new();
        for day in 1..=5 {
            // 0.75 intensity for one hour: 600 kcal
            workouts.push(workout(day, 60.0, 600.0));
            // surplus 300 = intake - (600 + 1600)
            nutrition.push(meal(day, 12, 2500.0, 150.0));
        }
        let series = TrendSeries {
            workouts: &workouts,
            nutrition: &nutrition,
            body_composition: &[],
        };

        let analysis = TrendAnalyzer::analyze(series, date(10), BMR, &config(10));

        assert_eq!(analysis.days.len(), 10);
        assert_eq!(analysis.window_start, date(1));
        assert!((analysis.optimal_calorie_surplus - 300.0).abs() < 1e-9);
        assert!((analysis.optimal_workout_intensity - 0.75).abs() < 1e-9);
        assert_eq!(analysis.estimated_intake_days, 5);
        assert_eq!(analysis.estimated_body_fat_days, 10);

        // default days: surplus 400, no training -> 0.6 * (1 - 100/500) = 0.48
        let expected_efficiency = (5.0 * 1.0 + 5.0 * 0.48) / 10.0;
        assert!((analysis.overall_efficiency - expected_efficiency).abs() < 1e-9);
        assert!((analysis.predicted_monthly_gain_kg - expected_efficiency * 0.5).abs() < 1e-9);
        assert!(analysis.predicted_monthly_fat_loss_kg >= 0.0);
        assert!(analysis.predicted_monthly_fat_loss_kg <= 0.8);
    }

    #[test]
    fn test_analyze_empty_window() {
        let series = TrendSeries {
            workouts: &[],
            nutrition: &[],
            body_composition: &[],
        };
        let analysis = TrendAnalyzer::analyze(series, date(10), BMR, &config(0));

        assert!(analysis.days.is_empty());
        assert_eq!(analysis.overall_efficiency, 0.0);
        assert_eq!(analysis.optimal_calorie_surplus, 0.0);
        assert_eq!(analysis.predicted_monthly_gain_kg, 0.0);
    }

    #[test]
    fn test_body_fat_does_not_change_day_scores() {
        let lean = vec![body(10, 8, 8.0)];
        let heavy = vec![body(10, 8, 35.0)];
        let score = |samples: &[BodyCompositionSample]| {
            let series = TrendSeries {
                workouts: &[],
                nutrition: &[],
                body_composition: samples,
            };
            TrendAnalyzer::reconstruct(series, date(10), BMR, &config(1)).remove(0)
        };

        let (a, b) = (score(&lean), score(&heavy));
        assert_eq!(a.body_fat_percent, 8.0);
        assert_eq!(b.body_fat_percent, 35.0);
        assert_eq!(a.muscle_gain_efficiency, b.muscle_gain_efficiency);
        assert_eq!(a.fat_loss_efficiency, b.fat_loss_efficiency);
    }

    #[test]
    fn test_oversized_window_is_capped() {
        let series = TrendSeries {
            workouts: &[],
            nutrition: &[],
            body_composition: &[],
        };
        let days = TrendAnalyzer::reconstruct(series, date(10), BMR, &config(u32::MAX));

        assert_eq!(days.len(), MAX_TREND_WINDOW_DAYS as usize);
        assert_eq!(days.last().map(|d| d.date), Some(date(10)));
    }

    #[test]
    fn test_window_before_earliest_date_is_truncated() {
        let series = TrendSeries {
            workouts: &[],
            nutrition: &[],
            body_composition: &[],
        };
        let first_day = NaiveDate::MIN + Days::new(2);
        let days = TrendAnalyzer::reconstruct(series, first_day, BMR, &config(10));

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, NaiveDate::MIN);
    }

    #[test]
    fn test_non_finite_bmr_is_contained() {
        let series = TrendSeries {
            workouts: &[],
            nutrition: &[],
            body_composition: &[],
        };
        let analysis = TrendAnalyzer::analyze(series, date(10), f64::NAN, &config(5));

        assert!(analysis.overall_efficiency.is_finite());
        assert!(analysis.days.iter().all(|d| d.surplus_kcal == 0.0));
    }
}
