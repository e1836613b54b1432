//! Metabolic rate estimation
//!
//! Basal metabolic rate via the Mifflin-St Jeor equation and maintenance energy
//! (TDEE) via activity multipliers:
//!
//! - male: `10 * weight + 6.25 * height - 5 * age + 5`
//! - female: `10 * weight + 6.25 * height - 5 * age - 161`
//!
//! Inputs are expected to be positive. Non-finite inputs propagate to non-finite
//! outputs; this is the only component that does not zero them, because a BMR is
//! an input to the ratio-producing components which apply the guards themselves.

use crate::config::MetabolicConfig;
use crate::types::{ActivityLevel, BodyProfile, Sex};

/// Estimate BMR (kcal/day) with the default coefficients
pub fn estimate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: Sex) -> f64 {
    estimate_bmr_with(weight_kg, height_cm, age_years, sex, &MetabolicConfig::default())
}

/// Estimate BMR (kcal/day) with explicit coefficients
pub fn estimate_bmr_with(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    sex: Sex,
    config: &MetabolicConfig,
) -> f64 {
    let sex_constant = match sex {
        Sex::Male => config.male_constant,
        Sex::Female => config.female_constant,
    };

    config.weight_coef * weight_kg
        + config.height_coef * height_cm
        + config.age_coef * f64::from(age_years)
        + sex_constant
}

/// Estimate TDEE (kcal/day) from a BMR and activity level
pub fn estimate_tdee(bmr: f64, level: ActivityLevel) -> f64 {
    estimate_tdee_with(bmr, level, &MetabolicConfig::default())
}

pub fn estimate_tdee_with(bmr: f64, level: ActivityLevel, config: &MetabolicConfig) -> f64 {
    bmr * config.activity_multipliers.for_level(level)
}

impl BodyProfile {
    /// BMR for this profile
    pub fn bmr(&self, config: &MetabolicConfig) -> f64 {
        estimate_bmr_with(
            self.weight_kg,
            self.height_cm,
            self.age_years,
            self.sex,
            config,
        )
    }

    /// Maintenance energy for this profile at the given activity level
    pub fn tdee(&self, level: ActivityLevel, config: &MetabolicConfig) -> f64 {
        estimate_tdee_with(self.bmr(config), level, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_male() {
        // Expected values follow the coefficients (10, 6.25, -5, +5), not the
        // 1568.75 sometimes quoted for this profile.
        // 700 + 1062.5 - 150 + 5
        assert_eq!(estimate_bmr(70.0, 170.0, 30, Sex::Male), 1617.5);
    }

    #[test]
    fn test_bmr_female() {
        // From the coefficients, not the 1402.75 sometimes quoted.
        // 700 + 1062.5 - 150 - 161
        assert_eq!(estimate_bmr(70.0, 170.0, 30, Sex::Female), 1451.5);
    }

    #[test]
    fn test_sex_offset_is_166() {
        let male = estimate_bmr(82.3, 181.0, 41, Sex::Male);
        let female = estimate_bmr(82.3, 181.0, 41, Sex::Female);
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_input_propagates() {
        assert!(estimate_bmr(f64::NAN, 170.0, 30, Sex::Male).is_nan());
        assert!(estimate_bmr(f64::INFINITY, 170.0, 30, Sex::Male).is_infinite());
    }

    #[test]
    fn test_tdee_multipliers() {
        let bmr = 1600.0;
        assert!((estimate_tdee(bmr, ActivityLevel::Sedentary) - 1920.0).abs() < 1e-9);
        assert!((estimate_tdee(bmr, ActivityLevel::Light) - 2200.0).abs() < 1e-9);
        assert!((estimate_tdee(bmr, ActivityLevel::Moderate) - 2480.0).abs() < 1e-9);
        assert!((estimate_tdee(bmr, ActivityLevel::VeryActive) - 2760.0).abs() < 1e-9);
        assert!((estimate_tdee(bmr, ActivityLevel::Extreme) - 3040.0).abs() < 1e-9);
    }

    #[test]
    fn test_profile_helpers() {
        let profile = BodyProfile {
            weight_kg: 70.0,
            height_cm: 170.0,
            age_years: 30,
            sex: Sex::Male,
            body_fat_percent: 18.0,
        };
        let config = MetabolicConfig::default();

        assert_eq!(profile.bmr(&config), 1617.5);
        assert!((profile.tdee(ActivityLevel::Moderate, &config) - 1617.5 * 1.55).abs() < 1e-9);
    }
}
