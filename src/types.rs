//! Core types for the fitcoach engine
//!
//! All entities are immutable value snapshots. The engine reads them and produces
//! new values; nothing here is mutated in place by a scoring function.

use crate::error::EngineError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(EngineError::UnknownSex(s.to_string())),
        }
    }
}

/// Activity level for TDEE estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Physical job or twice-daily training
    Extreme,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::VeryActive,
        ActivityLevel::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::Extreme => "extreme",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect();

        match key.as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" | "lightlyactive" => Ok(ActivityLevel::Light),
            "moderate" | "moderatelyactive" => Ok(ActivityLevel::Moderate),
            "veryactive" => Ok(ActivityLevel::VeryActive),
            "extreme" | "extraactive" => Ok(ActivityLevel::Extreme),
            _ => Err(EngineError::UnknownActivityLevel(s.to_string())),
        }
    }
}

/// Body statistics snapshot used for one estimation call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Age (years)
    pub age_years: u32,
    pub sex: Sex,
    /// Body fat (percentage, 0-100)
    pub body_fat_percent: f64,
}

/// One calendar day of aggregated energy and macro intake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEnergyRecord {
    pub date: NaiveDate,
    /// Calories eaten (kcal)
    pub calories_consumed: f64,
    /// Calories burned through activity (kcal)
    pub calories_burned: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
}

/// Qualitative energy balance state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieRange {
    Deficit,
    Maintenance,
    Surplus,
    OptimalMuscleGain,
}

impl CalorieRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalorieRange::Deficit => "deficit",
            CalorieRange::Maintenance => "maintenance",
            CalorieRange::Surplus => "surplus",
            CalorieRange::OptimalMuscleGain => "optimal_muscle_gain",
        }
    }
}

/// Workout classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    Strength,
    Cardio,
    Other,
}

/// A single workout session as recorded by the health store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub start: DateTime<Utc>,
    /// Session duration (seconds)
    pub duration_seconds: f64,
    /// Active calories burned during the session (kcal)
    #[serde(default)]
    pub calories_burned: f64,
    pub kind: WorkoutKind,
}

/// Strength sessions in a 7-day window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub weekly_sessions: u32,
    /// Average session duration (seconds)
    pub average_duration_seconds: f64,
}

/// Muscle-gain outlook bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGainPrediction {
    Low,
    Moderate,
    High,
    Excellent,
}

impl MuscleGainPrediction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGainPrediction::Low => "low",
            MuscleGainPrediction::Moderate => "moderate",
            MuscleGainPrediction::High => "high",
            MuscleGainPrediction::Excellent => "excellent",
        }
    }
}

/// Per-nutrient intake band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeBand {
    Low,
    Adequate,
    High,
}

/// Macro-nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Macro {
    Protein,
    Carbs,
    Fat,
}

/// Which way a goal metric has to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalDirection {
    Increase,
    Decrease,
}

/// Goal categories tracked by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Weight,
    BodyFat,
    MuscleMass,
    WeeklyWorkouts,
    DailyProtein,
    DailyCalories,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 6] = [
        GoalCategory::Weight,
        GoalCategory::BodyFat,
        GoalCategory::MuscleMass,
        GoalCategory::WeeklyWorkouts,
        GoalCategory::DailyProtein,
        GoalCategory::DailyCalories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Weight => "weight",
            GoalCategory::BodyFat => "body_fat",
            GoalCategory::MuscleMass => "muscle_mass",
            GoalCategory::WeeklyWorkouts => "weekly_workouts",
            GoalCategory::DailyProtein => "daily_protein",
            GoalCategory::DailyCalories => "daily_calories",
        }
    }

    /// Direction the metric usually has to move
    pub fn default_direction(&self) -> GoalDirection {
        match self {
            GoalCategory::Weight | GoalCategory::BodyFat => GoalDirection::Decrease,
            GoalCategory::MuscleMass
            | GoalCategory::WeeklyWorkouts
            | GoalCategory::DailyProtein
            | GoalCategory::DailyCalories => GoalDirection::Increase,
        }
    }

    /// Display unit
    pub fn unit(&self) -> &'static str {
        match self {
            GoalCategory::Weight | GoalCategory::MuscleMass => "kg",
            GoalCategory::BodyFat => "%",
            GoalCategory::WeeklyWorkouts => "sessions",
            GoalCategory::DailyProtein => "g",
            GoalCategory::DailyCalories => "kcal",
        }
    }
}

impl FromStr for GoalCategory {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        GoalCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| EngineError::UnknownGoalCategory(s.to_string()))
    }
}

/// A goal with its starting point, target and latest value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub category: GoalCategory,
    pub initial_value: f64,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: String,
    pub direction: GoalDirection,
}

/// Dated nutrition sample (one meal or one logged entry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionSample {
    pub timestamp: DateTime<Utc>,
    /// Energy (kcal)
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
}

/// Dated body-composition sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyCompositionSample {
    pub timestamp: DateTime<Utc>,
    /// Body fat (percentage, 0-100)
    pub body_fat_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_mass_kg: Option<f64>,
}
