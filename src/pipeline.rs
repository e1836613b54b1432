//! Pipeline orchestration
//!
//! This module provides the caller-side composition of the engine components.
//! A snapshot of body stats, daily records and raw series goes in; a coaching
//! report comes out.
//!
//! Stages, in dependency order:
//! 1. Metabolic estimate (BMR, TDEE)
//! 2. Daily and weekly energy balance
//! 3. Muscle-gain efficiency
//! 4. Calorie range (needs the efficiency score)
//! 5. Strength recommendation
//! 6. Macro analysis
//! 7. Historical trend
//! 8. Goal progress

use crate::advice::{calorie_range_text, prediction_text, training_advice_text};
use crate::balance::{classify_calorie_range_with, weekly_balance};
use crate::config::EngineConfig;
use crate::efficiency::{score_breakdown, EfficiencyBreakdown};
use crate::error::EngineError;
use crate::metabolic::estimate_tdee_with;
use crate::nutrition::{analyze_macros_with, MacroAnalysis};
use crate::progress::{summarize, ProgressSummary};
use crate::strength::{recommend, StrengthRecommendation};
use crate::trend::{TrendAnalysis, TrendAnalyzer, TrendSeries};
use crate::types::{
    ActivityLevel, BodyCompositionSample, BodyProfile, CalorieRange, DailyEnergyRecord,
    GoalProgress, NutritionSample, WorkoutRecord, WorkoutSummary,
};
use crate::{ENGINE_NAME, ENGINE_VERSION};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Current muscle mass and the target the user is working toward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuscleGoal {
    pub current_kg: f64,
    pub target_kg: f64,
}

/// Everything the presentation layer has gathered for one assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentInput {
    /// Reference time; the workout summary covers the 7 days ending here
    pub as_of: DateTime<Utc>,
    pub profile: BodyProfile,
    pub activity_level: ActivityLevel,
    /// The day being assessed
    pub today: DailyEnergyRecord,
    /// The last seven days, today included
    #[serde(default)]
    pub week: Vec<DailyEnergyRecord>,
    #[serde(default)]
    pub workouts: Vec<WorkoutRecord>,
    #[serde(default)]
    pub nutrition: Vec<NutritionSample>,
    #[serde(default)]
    pub body_composition: Vec<BodyCompositionSample>,
    #[serde(default)]
    pub goals: Vec<GoalProgress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_goal: Option<MuscleGoal>,
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Energy section of the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyReport {
    pub bmr_kcal: f64,
    pub tdee_kcal: f64,
    pub daily_balance_kcal: f64,
    pub weekly_balance_kcal: f64,
    pub calorie_range: CalorieRange,
    pub calorie_range_title: String,
    pub calorie_range_message: String,
}

/// Training section of the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub summary: WorkoutSummary,
    pub recommendation: StrengthRecommendation,
    pub prediction_title: String,
    pub prediction_message: String,
    pub advice_messages: Vec<String>,
}

/// Complete coaching report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingReport {
    pub report_id: String,
    pub producer: ReportProducer,
    pub generated_at_utc: String,
    pub as_of_utc: String,
    pub energy: EnergyReport,
    pub efficiency: EfficiencyBreakdown,
    pub training: TrainingReport,
    pub macros: MacroAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendAnalysis>,
    pub progress: ProgressSummary,
}

/// Assess a JSON snapshot with the default configuration.
///
/// # Example
/// ```ignore
/// let report_json = assess_json(snapshot_json)?;
/// ```
pub fn assess_json(input_json: &str) -> Result<String, EngineError> {
    CoachingEngine::new().assess_json(input_json)
}

/// Engine instance holding a configuration table and a producer id.
///
/// Holds no state between assessments; one instance can be shared freely.
pub struct CoachingEngine {
    config: EngineConfig,
    instance_id: String,
}

impl Default for CoachingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CoachingEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with a specific configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an engine from a JSON configuration table
    pub fn from_config_json(json: &str) -> Result<Self, EngineError> {
        Ok(Self::with_config(EngineConfig::from_json(json)?))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse a JSON snapshot, assess it and encode the report
    pub fn assess_json(&self, input_json: &str) -> Result<String, EngineError> {
        let input: AssessmentInput = serde_json::from_str(input_json)?;
        let report = self.assess(&input)?;
        Ok(serde_json::to_string(&report)?)
    }

    /// Run every component over one snapshot
    pub fn assess(&self, input: &AssessmentInput) -> Result<CoachingReport, EngineError> {
        validate_profile(&input.profile)?;
        let config = &self.config;
        let profile = &input.profile;

        // Stage 1: metabolic baseline
        let bmr = profile.bmr(&config.metabolic);
        let tdee = estimate_tdee_with(bmr, input.activity_level, &config.metabolic);
        debug!(bmr, tdee, "metabolic estimate");

        // Stage 2: energy balance
        let daily_balance = input.today.balance(bmr);
        let weekly = weekly_balance(&input.week, bmr);
        debug!(daily_balance, weekly_balance = weekly, "energy balance");

        // Stage 3: efficiency from this week's training
        let summary = WorkoutSummary::from_records(&input.workouts, input.as_of);
        let efficiency = score_breakdown(
            daily_balance,
            input.today.protein_g,
            profile.body_fat_percent,
            summary.weekly_sessions,
            &config.efficiency,
        );
        debug!(composite = efficiency.composite, "muscle-gain efficiency");

        // Stage 4: calorie range
        let calorie_range = classify_calorie_range_with(
            daily_balance,
            profile.body_fat_percent,
            efficiency.composite,
            &config.balance,
        );
        let (range_title, range_message) = calorie_range_text(calorie_range);

        // Stage 5: strength recommendation
        let recommendation = recommend(
            &summary,
            efficiency.composite,
            profile.body_fat_percent,
            input.muscle_goal.map(|g| (g.current_kg, g.target_kg)),
            &config.strength,
        );
        let (prediction_title, prediction_message) = prediction_text(recommendation.prediction);
        let advice_messages = recommendation
            .advice
            .iter()
            .map(|a| training_advice_text(*a).to_string())
            .collect();

        // Stage 6: macros
        let macros = analyze_macros_with(
            input.today.protein_g,
            input.today.carbs_g,
            input.today.fat_g,
            &config.nutrition,
        );

        // Stage 7: historical trend, only when history was supplied
        let has_history = !input.workouts.is_empty()
            || !input.nutrition.is_empty()
            || !input.body_composition.is_empty();
        let trend = has_history.then(|| {
            let series = TrendSeries {
                workouts: &input.workouts,
                nutrition: &input.nutrition,
                body_composition: &input.body_composition,
            };
            TrendAnalyzer::analyze(series, input.as_of.date_naive(), bmr, &config.trend)
        });

        // Stage 8: goals
        let progress = summarize(&input.goals);
        debug!(
            overall = progress.overall_progress,
            goals = progress.total_goals,
            "goal progress"
        );

        Ok(CoachingReport {
            report_id: Uuid::new_v4().to_string(),
            producer: ReportProducer {
                name: ENGINE_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            generated_at_utc: Utc::now().to_rfc3339(),
            as_of_utc: input.as_of.to_rfc3339(),
            energy: EnergyReport {
                bmr_kcal: bmr,
                tdee_kcal: tdee,
                daily_balance_kcal: daily_balance,
                weekly_balance_kcal: weekly,
                calorie_range,
                calorie_range_title: range_title.to_string(),
                calorie_range_message: range_message.to_string(),
            },
            efficiency,
            training: TrainingReport {
                summary,
                recommendation,
                prediction_title: prediction_title.to_string(),
                prediction_message: prediction_message.to_string(),
                advice_messages,
            },
            macros,
            trend,
            progress,
        })
    }
}

/// The formulas assume positive body stats; reject anything else up front
fn validate_profile(profile: &BodyProfile) -> Result<(), EngineError> {
    if !(profile.weight_kg.is_finite() && profile.weight_kg > 0.0) {
        return Err(EngineError::InvalidInput(format!(
            "weight_kg must be positive, got {}",
            profile.weight_kg
        )));
    }
    if !(profile.height_cm.is_finite() && profile.height_cm > 0.0) {
        return Err(EngineError::InvalidInput(format!(
            "height_cm must be positive, got {}",
            profile.height_cm
        )));
    }
    if profile.age_years == 0 {
        return Err(EngineError::InvalidInput("age_years must be positive".to_string()));
    }
    if !profile.body_fat_percent.is_finite() {
        return Err(EngineError::InvalidInput(
            "body_fat_percent must be finite".to_string(),
        ));
    }
    Ok(())
}
