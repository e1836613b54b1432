//! Numeric guards
//!
//! Every ratio or score leaving the engine passes through one of these helpers so
//! callers never observe NaN or infinite values.

use tracing::warn;

/// Replace a non-finite value with 0.0
pub fn finite_or_zero(value: f64, name: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!(value = %value, metric = name, "non-finite result replaced with 0");
        0.0
    }
}

/// Clamp a value to 0-1, replacing non-finite values with 0.0
pub fn unit_interval(value: f64, name: &str) -> f64 {
    finite_or_zero(value, name).clamp(0.0, 1.0)
}

/// Clamp a score to 0-1. Infinite values saturate at the nearer bound; NaN becomes 0.0
pub fn saturate(value: f64, name: &str) -> f64 {
    if value.is_nan() {
        warn!(metric = name, "NaN score replaced with 0");
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Divide, returning 0.0 when the denominator is zero or the result is not finite
pub fn safe_ratio(numerator: f64, denominator: f64, name: &str) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    finite_or_zero(numerator / denominator, name)
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().sum();
    sum / values.len() as f64
}
