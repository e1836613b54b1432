//! fitcoach - On-device fitness analytics and coaching engine
//!
//! fitcoach turns already-aggregated body-composition, workout and nutrition
//! samples into coaching feedback. Every component is a pure function over value
//! types; the [`pipeline`] module composes them in dependency order:
//! metabolic estimate → energy balance → muscle-gain efficiency → calorie range
//! → strength recommendation, alongside macro analysis, historical trends and
//! goal progress.
//!
//! ## Modules
//!
//! - **Metabolic**: BMR (Mifflin-St Jeor) and TDEE
//! - **Balance**: daily/weekly energy balance and calorie range classification
//! - **Efficiency**: composite muscle-gain efficiency score
//! - **Strength**: training frequency, muscle-gain outlook and time-to-goal
//! - **Nutrition**: macro percentages and per-nutrient advice
//! - **Trend**: rolling-window efficiency trend over reconstructed days
//! - **Progress**: goal progress normalization and aggregation

pub mod advice;
pub mod balance;
pub mod config;
pub mod efficiency;
pub mod error;
pub mod guard;
pub mod metabolic;
pub mod nutrition;
pub mod pipeline;
pub mod progress;
pub mod strength;
pub mod trend;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use balance::{classify_calorie_range, daily_balance, weekly_balance};
pub use config::EngineConfig;
pub use efficiency::score_muscle_gain_efficiency;
pub use error::EngineError;
pub use metabolic::{estimate_bmr, estimate_tdee};
pub use nutrition::analyze_macros;
pub use pipeline::{assess_json, AssessmentInput, CoachingEngine, CoachingReport};
pub use progress::compute_goal_progress;
pub use strength::{monthly_gain_kg, predict_muscle_gain, recommend_frequency, time_to_goal_months};
pub use trend::{TrendAnalyzer, TrendSeries};

/// Engine version embedded in every report
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const ENGINE_NAME: &str = "fitcoach";
