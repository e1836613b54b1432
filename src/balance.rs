//! Calorie balance
//!
//! Daily balance is `consumed - (burned + BMR)`; weekly balance is the plain sum
//! of the daily balances. Range classification is branch-ordered and the first
//! matching branch wins:
//!
//! 1. body fat above 25%: fat-loss thresholds (-300 / +100)
//! 2. muscle-gain efficiency above 0.7: optimal window [200, 500], surplus above it
//! 3. otherwise: default thresholds (-200 / +300)
//!
//! Muscle-gain efficiency has to be scored before classification when the second
//! branch is wanted.

use crate::config::BalanceConfig;
use crate::guard::finite_or_zero;
use crate::types::{CalorieRange, DailyEnergyRecord};
use tracing::debug;

/// Daily energy balance (kcal). Positive values are a surplus.
pub fn daily_balance(consumed: f64, burned: f64, bmr: f64) -> f64 {
    finite_or_zero(consumed - (burned + bmr), "daily_balance")
}

/// Sum of daily balances over a week of records
pub fn weekly_balance(records: &[DailyEnergyRecord], bmr: f64) -> f64 {
    if records.len() != 7 {
        debug!(days = records.len(), "weekly balance over a partial week");
    }
    let total: f64 = records.iter().map(|r| r.balance(bmr)).sum();
    finite_or_zero(total, "weekly_balance")
}

impl DailyEnergyRecord {
    /// Energy balance for this day
    pub fn balance(&self, bmr: f64) -> f64 {
        daily_balance(self.calories_consumed, self.calories_burned, bmr)
    }
}

/// Classify a daily balance with the default thresholds
pub fn classify_calorie_range(
    daily_balance: f64,
    body_fat_percent: f64,
    muscle_gain_efficiency: f64,
) -> CalorieRange {
    classify_calorie_range_with(
        daily_balance,
        body_fat_percent,
        muscle_gain_efficiency,
        &BalanceConfig::default(),
    )
}

/// Classify a daily balance with explicit thresholds
pub fn classify_calorie_range_with(
    daily_balance: f64,
    body_fat_percent: f64,
    muscle_gain_efficiency: f64,
    config: &BalanceConfig,
) -> CalorieRange {
    let balance = finite_or_zero(daily_balance, "classify_calorie_range.balance");

    if body_fat_percent > config.high_body_fat_percent {
        if balance < config.high_fat_deficit_below {
            CalorieRange::Deficit
        } else if balance > config.high_fat_surplus_above {
            CalorieRange::Surplus
        } else {
            CalorieRange::Maintenance
        }
    } else if muscle_gain_efficiency > config.efficient_above {
        if (config.optimal_gain_min..=config.optimal_gain_max).contains(&balance) {
            CalorieRange::OptimalMuscleGain
        } else if balance > config.optimal_gain_max {
            CalorieRange::Surplus
        } else {
            CalorieRange::Maintenance
        }
    } else if balance < config.deficit_below {
        CalorieRange::Deficit
    } else if balance > config.surplus_above {
        CalorieRange::Surplus
    } else {
        CalorieRange::Maintenance
    }
}
