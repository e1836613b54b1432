//! Display text for categorical results
//!
//! Domain logic only produces enum variants; the presentation layer looks the
//! wording up here.

use crate::strength::TrainingAdvice;
use crate::types::{CalorieRange, IntakeBand, Macro, MuscleGainPrediction};

/// Title and coaching message for a calorie range
pub fn calorie_range_text(range: CalorieRange) -> (&'static str, &'static str) {
    match range {
        CalorieRange::Deficit => (
            "Calorie deficit",
            "You are eating less than you burn. Good for fat loss; keep protein high to protect muscle.",
        ),
        CalorieRange::Maintenance => (
            "Maintenance",
            "Intake roughly matches expenditure. Weight should stay stable.",
        ),
        CalorieRange::Surplus => (
            "Calorie surplus",
            "You are eating well above what you burn. Expect some fat gain alongside muscle.",
        ),
        CalorieRange::OptimalMuscleGain => (
            "Optimal muscle gain",
            "A moderate surplus with solid training and protein. This is the ideal range for lean gains.",
        ),
    }
}

/// Title and outlook message for a muscle-gain prediction
pub fn prediction_text(prediction: MuscleGainPrediction) -> (&'static str, &'static str) {
    match prediction {
        MuscleGainPrediction::Low => (
            "Low",
            "Current habits support little muscle growth.",
        ),
        MuscleGainPrediction::Moderate => (
            "Moderate",
            "Steady progress is possible; tightening nutrition or training will speed it up.",
        ),
        MuscleGainPrediction::High => (
            "High",
            "Nutrition and training are well aligned for muscle growth.",
        ),
        MuscleGainPrediction::Excellent => (
            "Excellent",
            "Near-ideal conditions for building muscle.",
        ),
    }
}

/// Message for one training advice item
pub fn training_advice_text(advice: TrainingAdvice) -> &'static str {
    match advice {
        TrainingAdvice::IncreaseFrequency => {
            "Increase training frequency to at least 3 strength sessions per week."
        }
        TrainingAdvice::ReduceForRecovery => {
            "Reduce training frequency to leave enough time for recovery."
        }
        TrainingAdvice::ExtendSession => "Extend your sessions to at least 30 minutes.",
        TrainingAdvice::ShortenSession => {
            "Shorten your sessions; more than 90 minutes risks fatigue."
        }
        TrainingAdvice::ReduceBodyFatFirst => {
            "Focus on reducing body fat first, then shift to building muscle."
        }
        TrainingAdvice::RaiseIntensity => {
            "Raise training intensity or frequency to improve muscle-gain efficiency."
        }
        TrainingAdvice::MaintainPace => "Great work. Maintain your current pace.",
    }
}

/// Message for a nutrient's intake band
pub fn macro_advice_text(nutrient: Macro, band: IntakeBand) -> &'static str {
    match (nutrient, band) {
        (Macro::Protein, IntakeBand::Low) => {
            "Protein intake is low. Add lean meat, eggs, dairy or legumes to support muscle repair."
        }
        (Macro::Protein, IntakeBand::Adequate) => "Protein intake is in a good range.",
        (Macro::Protein, IntakeBand::High) => {
            "Protein intake is high. Make sure carbs and fats are not crowded out."
        }
        (Macro::Carbs, IntakeBand::Low) => {
            "Carbohydrate intake is low. Training performance may suffer; add whole grains or fruit."
        }
        (Macro::Carbs, IntakeBand::Adequate) => "Carbohydrate intake is in a good range.",
        (Macro::Carbs, IntakeBand::High) => {
            "Carbohydrate intake is high. Cut back on refined carbs and sugar."
        }
        (Macro::Fat, IntakeBand::Low) => {
            "Fat intake is low. Include nuts, olive oil or fish for essential fatty acids."
        }
        (Macro::Fat, IntakeBand::Adequate) => "Fat intake is in a good range.",
        (Macro::Fat, IntakeBand::High) => {
            "Fat intake is high. Reduce fried food and fatty cuts of meat."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_text() {
        for range in [
            CalorieRange::Deficit,
            CalorieRange::Maintenance,
            CalorieRange::Surplus,
            CalorieRange::OptimalMuscleGain,
        ] {
            let (title, message) = calorie_range_text(range);
            assert!(!title.is_empty() && !message.is_empty());
        }

        for nutrient in [Macro::Protein, Macro::Carbs, Macro::Fat] {
            for band in [IntakeBand::Low, IntakeBand::Adequate, IntakeBand::High] {
                assert!(!macro_advice_text(nutrient, band).is_empty());
            }
        }
    }
}
