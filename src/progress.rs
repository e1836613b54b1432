//! Goal progress
//!
//! Normalizes goals measured in different units into 0-1 progress:
//!
//! - decreasing goals: `(initial - current) / (initial - target)`
//! - increasing goals: `(current - initial) / (target - initial)`
//!
//! A goal that requires no change (or a change against its direction) has
//! progress 0.

use crate::guard::{mean, safe_ratio, unit_interval};
use crate::types::{GoalCategory, GoalDirection, GoalProgress};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Progress (0-1) from `initial` toward `target`
pub fn compute_goal_progress(
    current: f64,
    initial: f64,
    target: f64,
    direction: GoalDirection,
) -> f64 {
    let (covered, required) = match direction {
        GoalDirection::Decrease => (initial - current, initial - target),
        GoalDirection::Increase => (current - initial, target - initial),
    };

    if required.is_nan() || required <= 0.0 {
        return 0.0;
    }
    unit_interval(safe_ratio(covered, required, "goal_progress"), "goal_progress")
}

impl GoalProgress {
    /// Goal with the category's default unit and direction
    pub fn new(category: GoalCategory, initial: f64, current: f64, target: f64) -> Self {
        Self {
            category,
            initial_value: initial,
            current_value: current,
            target_value: target,
            unit: category.unit().to_string(),
            direction: category.default_direction(),
        }
    }

    /// Progress ratio (0-1)
    pub fn progress(&self) -> f64 {
        compute_goal_progress(
            self.current_value,
            self.initial_value,
            self.target_value,
            self.direction,
        )
    }

    /// Completion flag as the app defines it: `current >= target`
    pub fn is_completed(&self) -> bool {
        self.current_value >= self.target_value
    }

    /// Direction-aware completion
    pub fn is_reached(&self) -> bool {
        match self.direction {
            GoalDirection::Increase => self.current_value >= self.target_value,
            GoalDirection::Decrease => self.current_value <= self.target_value,
        }
    }

    /// Distance still to cover in the goal's unit, never negative
    pub fn remaining(&self) -> f64 {
        let remaining = match self.direction {
            GoalDirection::Increase => self.target_value - self.current_value,
            GoalDirection::Decrease => self.current_value - self.target_value,
        };
        if remaining.is_finite() {
            remaining.max(0.0)
        } else {
            0.0
        }
    }
}

/// Progress summary across all goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Mean progress of each category's goals
    pub categories: BTreeMap<GoalCategory, f64>,
    /// Unweighted mean over the categories present (0-1)
    pub overall_progress: f64,
    /// Fraction of goals whose completion flag is set (0-1)
    pub completion_rate: f64,
    pub completed_goals: usize,
    pub total_goals: usize,
}

/// Mean progress per category
pub fn category_progress(goals: &[GoalProgress]) -> BTreeMap<GoalCategory, f64> {
    let mut grouped: BTreeMap<GoalCategory, Vec<f64>> = BTreeMap::new();
    for goal in goals {
        grouped.entry(goal.category).or_default().push(goal.progress());
    }

    grouped
        .into_iter()
        .map(|(category, values)| (category, unit_interval(mean(&values), "category_progress")))
        .collect()
}

/// Unweighted mean of category progress values
pub fn overall_progress(categories: &BTreeMap<GoalCategory, f64>) -> f64 {
    let values: Vec<f64> = categories.values().copied().collect();
    unit_interval(mean(&values), "overall_progress")
}

/// Fraction of goals marked completed
pub fn completion_rate(goals: &[GoalProgress]) -> f64 {
    let completed = goals.iter().filter(|g| g.is_completed()).count();
    unit_interval(
        safe_ratio(completed as f64, goals.len() as f64, "completion_rate"),
        "completion_rate",
    )
}

/// Summarize a set of goals
pub fn summarize(goals: &[GoalProgress]) -> ProgressSummary {
    let categories = category_progress(goals);
    ProgressSummary {
        overall_progress: overall_progress(&categories),
        completion_rate: completion_rate(goals),
        completed_goals: goals.iter().filter(|g| g.is_completed()).count(),
        total_goals: goals.len(),
        categories,
    }
}
