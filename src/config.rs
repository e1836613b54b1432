//! Engine configuration
//!
//! Every threshold, anchor and weight used by the scoring formulas lives in
//! [`EngineConfig`]. The defaults are the product's coaching policy; overriding
//! them changes coaching behavior without touching formula code.
//!
//! Each section is `#[serde(default)]`, so a partial JSON document only needs the
//! values it changes.

use crate::error::EngineError;
use crate::types::{ActivityLevel, MuscleGainPrediction};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete threshold table for the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub metabolic: MetabolicConfig,
    pub balance: BalanceConfig,
    pub efficiency: EfficiencyConfig,
    pub strength: StrengthConfig,
    pub nutrition: NutritionConfig,
    pub trend: TrendConfig,
}

/// Mifflin-St Jeor coefficients and TDEE multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetabolicConfig {
    pub weight_coef: f64,
    pub height_coef: f64,
    pub age_coef: f64,
    pub male_constant: f64,
    pub female_constant: f64,
    pub activity_multipliers: ActivityMultipliers,
}

impl Default for MetabolicConfig {
    fn default() -> Self {
        Self {
            weight_coef: 10.0,
            height_coef: 6.25,
            age_coef: -5.0,
            male_constant: 5.0,
            female_constant: -161.0,
            activity_multipliers: ActivityMultipliers::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityMultipliers {
    pub sedentary: f64,
    pub light: f64,
    pub moderate: f64,
    pub very_active: f64,
    pub extreme: f64,
}

impl Default for ActivityMultipliers {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            very_active: 1.725,
            extreme: 1.9,
        }
    }
}

impl ActivityMultipliers {
    pub fn for_level(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::Extreme => self.extreme,
        }
    }
}

/// Calorie range classification thresholds (kcal unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Body fat (%) above which the fat-loss policy applies
    pub high_body_fat_percent: f64,
    pub high_fat_deficit_below: f64,
    pub high_fat_surplus_above: f64,
    /// Muscle-gain efficiency above which the optimal-gain window applies
    pub efficient_above: f64,
    pub optimal_gain_min: f64,
    pub optimal_gain_max: f64,
    pub deficit_below: f64,
    pub surplus_above: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            high_body_fat_percent: 25.0,
            high_fat_deficit_below: -300.0,
            high_fat_surplus_above: 100.0,
            efficient_above: 0.7,
            optimal_gain_min: 200.0,
            optimal_gain_max: 500.0,
            deficit_below: -200.0,
            surplus_above: 300.0,
        }
    }
}

/// Muscle-gain efficiency anchors and weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyConfig {
    /// Body fat (%) above which the calorie-fit anchor switches to a deficit
    pub cut_body_fat_percent: f64,
    pub cut_balance_anchor: f64,
    pub bulk_balance_anchor: f64,
    pub calorie_fit_scale: f64,
    pub protein_target_g: f64,
    pub weekly_session_target: f64,
    /// Body fat (%) at which the body-fat score reaches zero
    pub body_fat_scale: f64,
    pub weights: EfficiencyWeights,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            cut_body_fat_percent: 20.0,
            cut_balance_anchor: -200.0,
            bulk_balance_anchor: 300.0,
            calorie_fit_scale: 500.0,
            protein_target_g: 120.0,
            weekly_session_target: 4.0,
            body_fat_scale: 30.0,
            weights: EfficiencyWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyWeights {
    pub calorie_fit: f64,
    pub protein: f64,
    pub workout: f64,
    pub body_fat: f64,
}

impl Default for EfficiencyWeights {
    fn default() -> Self {
        Self {
            calorie_fit: 0.3,
            protein: 0.3,
            workout: 0.2,
            body_fat: 0.2,
        }
    }
}

impl EfficiencyWeights {
    pub fn total(&self) -> f64 {
        self.calorie_fit + self.protein + self.workout + self.body_fat
    }
}

/// Strength-training recommendation thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthConfig {
    pub low_efficiency_below: f64,
    pub high_efficiency_above: f64,
    /// Floor applied when efficiency is low
    pub low_efficiency_min_sessions: u32,
    /// Floor applied in the middle band
    pub min_sessions: u32,
    pub excellent_from: f64,
    pub high_from: f64,
    pub moderate_from: f64,
    pub monthly_gain_kg: MonthlyGainTable,
    pub advice: TrainingAdviceThresholds,
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            low_efficiency_below: 0.3,
            high_efficiency_above: 0.7,
            low_efficiency_min_sessions: 3,
            min_sessions: 2,
            excellent_from: 0.8,
            high_from: 0.6,
            moderate_from: 0.4,
            monthly_gain_kg: MonthlyGainTable::default(),
            advice: TrainingAdviceThresholds::default(),
        }
    }
}

/// Monthly lean-mass gain (kg) per prediction bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyGainTable {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
    pub excellent: f64,
}

impl Default for MonthlyGainTable {
    fn default() -> Self {
        Self {
            low: 0.2,
            moderate: 0.5,
            high: 0.8,
            excellent: 1.2,
        }
    }
}

impl MonthlyGainTable {
    pub fn for_prediction(&self, prediction: MuscleGainPrediction) -> f64 {
        match prediction {
            MuscleGainPrediction::Low => self.low,
            MuscleGainPrediction::Moderate => self.moderate,
            MuscleGainPrediction::High => self.high,
            MuscleGainPrediction::Excellent => self.excellent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingAdviceThresholds {
    pub min_weekly_sessions: u32,
    pub max_weekly_sessions: u32,
    pub min_session_minutes: f64,
    pub max_session_minutes: f64,
    pub high_body_fat_percent: f64,
    pub low_efficiency_below: f64,
    pub high_efficiency_above: f64,
}

impl Default for TrainingAdviceThresholds {
    fn default() -> Self {
        Self {
            min_weekly_sessions: 3,
            max_weekly_sessions: 5,
            min_session_minutes: 30.0,
            max_session_minutes: 90.0,
            high_body_fat_percent: 25.0,
            low_efficiency_below: 0.4,
            high_efficiency_above: 0.7,
        }
    }
}

/// Macro-nutrient energy factors and intake bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionConfig {
    pub kcal_per_g_protein: f64,
    pub kcal_per_g_carbs: f64,
    pub kcal_per_g_fat: f64,
    pub protein_band_g: IntakeRange,
    pub carbs_band_g: IntakeRange,
    pub fat_band_g: IntakeRange,
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self {
            kcal_per_g_protein: 4.0,
            kcal_per_g_carbs: 4.0,
            kcal_per_g_fat: 9.0,
            protein_band_g: IntakeRange::new(60.0, 120.0),
            carbs_band_g: IntakeRange::new(100.0, 300.0),
            fat_band_g: IntakeRange::new(30.0, 80.0),
        }
    }
}

/// Inclusive adequate-intake range (grams)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntakeRange {
    pub low: f64,
    pub high: f64,
}

impl IntakeRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// Longest trend window accepted (about ten years of days)
pub const MAX_TREND_WINDOW_DAYS: u32 = 3650;

/// Historical trend reconstruction defaults and efficiency variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub window_days: u32,
    /// Intake assumed for a day without nutrition samples (kcal)
    pub default_intake_kcal: f64,
    /// Body fat assumed for a day without body-composition samples (%)
    pub default_body_fat_percent: f64,
    /// Burn rate treated as maximal intensity (kcal/hour)
    pub max_intensity_kcal_per_hour: f64,
    pub top_days: usize,
    pub muscle_gain: EfficiencyVariant,
    pub fat_loss: EfficiencyVariant,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            default_intake_kcal: 2000.0,
            default_body_fat_percent: 20.0,
            max_intensity_kcal_per_hour: 800.0,
            top_days: 5,
            muscle_gain: EfficiencyVariant {
                calorie_anchor: 300.0,
                calorie_scale: 500.0,
                intensity_anchor: 0.75,
                calorie_weight: 0.6,
                intensity_weight: 0.4,
                monthly_baseline_kg: 0.5,
            },
            fat_loss: EfficiencyVariant {
                calorie_anchor: 500.0,
                calorie_scale: 500.0,
                intensity_anchor: 0.65,
                calorie_weight: 0.7,
                intensity_weight: 0.3,
                monthly_baseline_kg: 0.8,
            },
        }
    }
}

/// One per-day efficiency formula of the trend analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyVariant {
    /// Target surplus (muscle gain) or deficit (fat loss) in kcal
    pub calorie_anchor: f64,
    pub calorie_scale: f64,
    pub intensity_anchor: f64,
    pub calorie_weight: f64,
    pub intensity_weight: f64,
    /// Monthly change at efficiency 1.0 (kg)
    pub monthly_baseline_kg: f64,
}

impl EngineConfig {
    /// Load configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize configuration to pretty JSON
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the table can drive the formulas without invalid arithmetic
    pub fn validate(&self) -> Result<(), EngineError> {
        let e = &self.efficiency;
        positive("efficiency.calorie_fit_scale", e.calorie_fit_scale)?;
        positive("efficiency.protein_target_g", e.protein_target_g)?;
        positive("efficiency.weekly_session_target", e.weekly_session_target)?;
        positive("efficiency.body_fat_scale", e.body_fat_scale)?;
        finite("efficiency.cut_balance_anchor", e.cut_balance_anchor)?;
        finite("efficiency.bulk_balance_anchor", e.bulk_balance_anchor)?;
        finite("efficiency.cut_body_fat_percent", e.cut_body_fat_percent)?;
        unit_sum("efficiency.weights", e.weights.total())?;

        let m = &self.metabolic;
        for (name, value) in [
            ("metabolic.weight_coef", m.weight_coef),
            ("metabolic.height_coef", m.height_coef),
            ("metabolic.age_coef", m.age_coef),
            ("metabolic.male_constant", m.male_constant),
            ("metabolic.female_constant", m.female_constant),
        ] {
            finite(name, value)?;
        }
        for level in ActivityLevel::ALL {
            positive(
                &format!("metabolic.activity_multipliers.{}", level),
                m.activity_multipliers.for_level(level),
            )?;
        }

        let b = &self.balance;
        ordered(
            "balance.optimal_gain_min/optimal_gain_max",
            b.optimal_gain_min,
            b.optimal_gain_max,
        )?;
        ordered(
            "balance.high_fat_deficit_below/high_fat_surplus_above",
            b.high_fat_deficit_below,
            b.high_fat_surplus_above,
        )?;
        ordered(
            "balance.deficit_below/surplus_above",
            b.deficit_below,
            b.surplus_above,
        )?;

        let s = &self.strength;
        ordered(
            "strength.low_efficiency_below/high_efficiency_above",
            s.low_efficiency_below,
            s.high_efficiency_above,
        )?;
        ordered("strength.moderate_from/high_from", s.moderate_from, s.high_from)?;
        ordered("strength.high_from/excellent_from", s.high_from, s.excellent_from)?;
        let a = &s.advice;
        if a.min_weekly_sessions > a.max_weekly_sessions {
            return Err(EngineError::InvalidConfig(
                "strength.advice.min_weekly_sessions exceeds max_weekly_sessions".to_string(),
            ));
        }
        ordered(
            "strength.advice.min_session_minutes/max_session_minutes",
            a.min_session_minutes,
            a.max_session_minutes,
        )?;

        let n = &self.nutrition;
        for (name, range) in [
            ("nutrition.protein_band_g", n.protein_band_g),
            ("nutrition.carbs_band_g", n.carbs_band_g),
            ("nutrition.fat_band_g", n.fat_band_g),
        ] {
            ordered(name, range.low, range.high)?;
        }
        positive("nutrition.kcal_per_g_protein", n.kcal_per_g_protein)?;
        positive("nutrition.kcal_per_g_carbs", n.kcal_per_g_carbs)?;
        positive("nutrition.kcal_per_g_fat", n.kcal_per_g_fat)?;

        let t = &self.trend;
        if !(1..=MAX_TREND_WINDOW_DAYS).contains(&t.window_days) {
            return Err(EngineError::InvalidConfig(format!(
                "trend.window_days must be between 1 and {MAX_TREND_WINDOW_DAYS} (got {})",
                t.window_days
            )));
        }
        positive("trend.max_intensity_kcal_per_hour", t.max_intensity_kcal_per_hour)?;
        finite("trend.default_intake_kcal", t.default_intake_kcal)?;
        finite("trend.default_body_fat_percent", t.default_body_fat_percent)?;
        for (name, variant) in [("trend.muscle_gain", &t.muscle_gain), ("trend.fat_loss", &t.fat_loss)] {
            positive(&format!("{name}.calorie_scale"), variant.calorie_scale)?;
            positive(&format!("{name}.intensity_anchor"), variant.intensity_anchor)?;
            finite(&format!("{name}.calorie_anchor"), variant.calorie_anchor)?;
            finite(&format!("{name}.monthly_baseline_kg"), variant.monthly_baseline_kg)?;
            unit_sum(name, variant.calorie_weight + variant.intensity_weight)?;
        }

        Ok(())
    }
}

fn finite(name: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!("{name} must be finite")))
    }
}

fn positive(name: &str, value: f64) -> Result<(), EngineError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!("{name} must be positive")))
    }
}

fn ordered(name: &str, low: f64, high: f64) -> Result<(), EngineError> {
    finite(name, low)?;
    finite(name, high)?;
    if low <= high {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!("{name} bounds are inverted")))
    }
}

fn unit_sum(name: &str, total: f64) -> Result<(), EngineError> {
    if (total - 1.0).abs() <= 1e-6 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{name} must sum to 1.0 (got {total})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"efficiency": {"protein_target_g": 150.0}}"#)
            .unwrap();

        assert_eq!(config.efficiency.protein_target_g, 150.0);
        assert_eq!(config.efficiency.weekly_session_target, 4.0);
        assert_eq!(config.balance, BalanceConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::default();
        let json = config.to_json().unwrap();
        let loaded = EngineConfig::from_json(&json).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_rejects_zero_divisor() {
        let result = EngineConfig::from_json(r#"{"efficiency": {"protein_target_g": 0.0}}"#);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_unbalanced_weights() {
        let result = EngineConfig::from_json(
            r#"{"efficiency": {"weights": {"calorie_fit": 0.5, "protein": 0.5, "workout": 0.2, "body_fat": 0.2}}}"#,
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_inverted_band() {
        let result = EngineConfig::from_json(
            r#"{"nutrition": {"fat_band_g": {"low": 90.0, "high": 30.0}}}"#,
        );
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_trend_window_bounds() {
        let oversized = EngineConfig::from_json(r#"{"trend": {"window_days": 200000000}}"#);
        assert!(matches!(oversized, Err(EngineError::InvalidConfig(_))));

        let zero = EngineConfig::from_json(r#"{"trend": {"window_days": 0}}"#);
        assert!(matches!(zero, Err(EngineError::InvalidConfig(_))));

        let longest = EngineConfig::from_json(r#"{"trend": {"window_days": 3650}}"#).unwrap();
        assert_eq!(longest.trend.window_days, MAX_TREND_WINDOW_DAYS);
        assert!(EngineConfig::from_json(r#"{"trend": {"window_days": 3651}}"#).is_err());
    }

    #[test]
    fn test_activity_multipliers() {
        let m = ActivityMultipliers::default();
        assert_eq!(m.for_level(ActivityLevel::Sedentary), 1.2);
        assert_eq!(m.for_level(ActivityLevel::Extreme), 1.9);
    }
}
