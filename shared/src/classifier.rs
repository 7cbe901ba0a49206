//! Rule-based mood classifier
//!
//! Rules form a priority cascade: they are checked in table order and the
//! first rule whose conditions all hold decides the mood. Inputs matching
//! no rule are `balanced`.

use crate::models::{Mood, MoodPrediction, Nutrient, NutritionInput};
use serde::{Deserialize, Serialize};

/// Confidence reported in `ConfidenceMode::Fixed`
pub const FIXED_CONFIDENCE: f64 = 0.85;

const MARGIN_BASE: f64 = 0.6;
const SHORTFALL_BASE: f64 = 0.5;
const CONFIDENCE_STEP: f64 = 0.1;
const MAX_CONFIDENCE: f64 = 0.95;

/// How confidence is derived for a prediction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceMode {
    /// Constant 0.85 for every prediction
    #[default]
    Fixed,
    /// Scales with how far the inputs clear (or miss) the rule thresholds
    RuleMargin,
}

/// Strict comparison against a level threshold
#[derive(Debug, Clone, Copy)]
enum Comparison {
    Above(u8),
    Below(u8),
}

#[derive(Debug, Clone, Copy)]
struct Condition {
    nutrient: Nutrient,
    comparison: Comparison,
}

impl Condition {
    const fn above(nutrient: Nutrient, threshold: u8) -> Self {
        Self {
            nutrient,
            comparison: Comparison::Above(threshold),
        }
    }

    const fn below(nutrient: Nutrient, threshold: u8) -> Self {
        Self {
            nutrient,
            comparison: Comparison::Below(threshold),
        }
    }

    /// Steps by which the input clears the threshold; positive iff satisfied
    fn margin(&self, input: &NutritionInput) -> i8 {
        let level = input.level(self.nutrient).value() as i8;
        match self.comparison {
            Comparison::Above(threshold) => level - threshold as i8,
            Comparison::Below(threshold) => threshold as i8 - level,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    mood: Mood,
    conditions: [Condition; 2],
}

impl Rule {
    fn matches(&self, input: &NutritionInput) -> bool {
        self.conditions.iter().all(|c| c.margin(input) > 0)
    }

    fn margin(&self, input: &NutritionInput) -> u8 {
        self.conditions.iter().map(|c| c.margin(input).max(0) as u8).sum()
    }

    /// Level steps still needed before every condition holds
    fn shortfall(&self, input: &NutritionInput) -> u8 {
        self.conditions
            .iter()
            .map(|c| (1 - c.margin(input)).max(0) as u8)
            .sum()
    }
}

/// Cascade order is significant, inputs can satisfy several rules
const RULES: [Rule; 3] = [
    Rule {
        mood: Mood::Energizing,
        conditions: [
            Condition::above(Nutrient::Calorie, 2),
            Condition::above(Nutrient::Protein, 1),
        ],
    },
    Rule {
        mood: Mood::Calming,
        conditions: [
            Condition::above(Nutrient::Fat, 2),
            Condition::above(Nutrient::Carbohydrate, 2),
        ],
    },
    Rule {
        mood: Mood::Focused,
        conditions: [
            Condition::above(Nutrient::Protein, 2),
            Condition::below(Nutrient::Carbohydrate, 2),
        ],
    },
];

/// Maps nutrition levels to a mood prediction
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodClassifier {
    mode: ConfidenceMode,
}

impl MoodClassifier {
    pub fn new(mode: ConfidenceMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ConfidenceMode {
        self.mode
    }

    /// Mood chosen by the first matching rule, `balanced` otherwise
    pub fn classify_mood(input: &NutritionInput) -> Mood {
        RULES
            .iter()
            .find(|rule| rule.matches(input))
            .map(|rule| rule.mood)
            .unwrap_or(Mood::Balanced)
    }

    pub fn classify(&self, input: &NutritionInput) -> MoodPrediction {
        let mood = Self::classify_mood(input);
        // each rule yields a distinct mood
        let fired = RULES.iter().find(|rule| rule.mood == mood);

        let confidence = match self.mode {
            ConfidenceMode::Fixed => FIXED_CONFIDENCE,
            ConfidenceMode::RuleMargin => match fired {
                Some(rule) => scaled(MARGIN_BASE, rule.margin(input)),
                None => {
                    let shortfall = RULES
                        .iter()
                        .map(|rule| rule.shortfall(input))
                        .min()
                        .unwrap_or(0);
                    scaled(SHORTFALL_BASE, shortfall)
                }
            },
        };

        MoodPrediction { mood, confidence }
    }
}

fn scaled(base: f64, steps: u8) -> f64 {
    (base + CONFIDENCE_STEP * f64::from(steps)).min(MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_levels;
    use rstest::rstest;

    fn input(c: i64, p: i64, f: i64, carb: i64) -> NutritionInput {
        validate_levels(c, p, f, carb).unwrap()
    }

    #[rstest]
    #[case::energizing_beats_calming(input(3, 2, 3, 3), Mood::Energizing)]
    #[case::calorie_boundary_is_strict(input(2, 2, 0, 0), Mood::Balanced)]
    #[case::focused(input(0, 3, 0, 1), Mood::Focused)]
    #[case::default(input(0, 0, 0, 0), Mood::Balanced)]
    #[case::calming(input(0, 0, 3, 3), Mood::Calming)]
    #[case::calming_with_high_protein(input(2, 3, 3, 3), Mood::Calming)]
    #[case::energizing_beats_focused(input(3, 3, 0, 0), Mood::Energizing)]
    #[case::protein_boundary_is_strict(input(3, 1, 0, 0), Mood::Balanced)]
    #[case::carb_boundary_is_strict(input(0, 3, 0, 2), Mood::Balanced)]
    fn test_cascade(#[case] input: NutritionInput, #[case] expected: Mood) {
        assert_eq!(MoodClassifier::classify_mood(&input), expected);
        assert_eq!(MoodClassifier::default().classify(&input).mood, expected);
    }

    #[test]
    fn test_classify_agrees_with_cascade_for_every_input() {
        for input in NutritionInput::all() {
            let expected = MoodClassifier::classify_mood(&input);
            for mode in [ConfidenceMode::Fixed, ConfidenceMode::RuleMargin] {
                assert_eq!(MoodClassifier::new(mode).classify(&input).mood, expected, "{:?}", input);
            }
        }
    }

    #[test]
    fn test_fixed_confidence() {
        let prediction = MoodClassifier::default().classify(&input(0, 0, 0, 0));
        assert_eq!(prediction.mood, Mood::Balanced);
        assert_eq!(prediction.confidence, FIXED_CONFIDENCE);
    }

    #[test]
    fn test_rule_margin_confidence() {
        let classifier = MoodClassifier::new(ConfidenceMode::RuleMargin);

        // calorie clears by 1, protein by 2
        let strong = classifier.classify(&input(3, 3, 0, 0));
        assert_eq!(strong.mood, Mood::Energizing);
        assert!((strong.confidence - 0.9).abs() < 1e-9);

        let weak = classifier.classify(&input(3, 2, 0, 0));
        assert!((weak.confidence - 0.8).abs() < 1e-9);

        // focused needs 3 protein steps, the cheapest rule to reach
        let idle = classifier.classify(&input(0, 0, 0, 0));
        assert_eq!(idle.mood, Mood::Balanced);
        assert!((idle.confidence - 0.8).abs() < 1e-9);

        // one calorie step away from energizing
        let borderline = classifier.classify(&input(2, 2, 0, 0));
        assert_eq!(borderline.mood, Mood::Balanced);
        assert!((borderline.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_in_range_for_every_input() {
        for mode in [ConfidenceMode::Fixed, ConfidenceMode::RuleMargin] {
            let classifier = MoodClassifier::new(mode);
            for input in NutritionInput::all() {
                let prediction = classifier.classify(&input);
                assert!(
                    prediction.confidence > 0.0 && prediction.confidence <= 1.0,
                    "{:?} gave confidence {} in {:?}",
                    input,
                    prediction.confidence,
                    mode
                );
            }
        }
    }

    #[test]
    fn test_modes_agree_on_mood() {
        let fixed = MoodClassifier::new(ConfidenceMode::Fixed);
        let margin = MoodClassifier::new(ConfidenceMode::RuleMargin);
        for input in NutritionInput::all() {
            assert_eq!(fixed.classify(&input).mood, margin.classify(&input).mood);
        }
    }
}
