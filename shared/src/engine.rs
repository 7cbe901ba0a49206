//! Mood and recommendation engine
//!
//! `MoodEngine::predict` is a pure function of its input: no I/O, no
//! interior mutability, safe to share across threads behind an `Arc`.

use crate::catalog::FoodCatalog;
use crate::classifier::{ConfidenceMode, MoodClassifier};
use crate::models::{MlResponse, NutritionInput};
use crate::recommend::{RecommendationSelector, DEFAULT_MAX_RECOMMENDATIONS};
use crate::summary::{format_nutrition_summary, Locale};
use serde::{Deserialize, Serialize};

/// Engine tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub confidence_mode: ConfidenceMode,
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
    #[serde(default)]
    pub summary_locale: Locale,
}

fn default_max_recommendations() -> usize {
    DEFAULT_MAX_RECOMMENDATIONS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_mode: ConfidenceMode::Fixed,
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            summary_locale: Locale::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoodEngine {
    classifier: MoodClassifier,
    catalog: FoodCatalog,
    config: EngineConfig,
}

impl Default for MoodEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl MoodEngine {
    /// Engine backed by the built-in catalog
    pub fn new(config: EngineConfig) -> Self {
        Self::with_catalog(config, FoodCatalog::builtin().clone())
    }

    pub fn with_catalog(config: EngineConfig, catalog: FoodCatalog) -> Self {
        Self {
            classifier: MoodClassifier::new(config.confidence_mode),
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FoodCatalog {
        &self.catalog
    }

    /// Classify the input and rank matching foods
    pub fn predict(&self, input: &NutritionInput) -> MlResponse {
        let mood_prediction = self.classifier.classify(input);
        let food_recommendations = RecommendationSelector::new(&self.catalog, self.config.max_recommendations)
            .select(input, mood_prediction.mood);

        MlResponse {
            mood_prediction,
            food_recommendations,
        }
    }

    /// Summary in the configured locale
    pub fn summarize(&self, input: &NutritionInput) -> String {
        format_nutrition_summary(input, self.config.summary_locale)
    }

    pub fn summarize_in(&self, input: &NutritionInput, locale: Locale) -> String {
        format_nutrition_summary(input, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FIXED_CONFIDENCE;
    use crate::models::Mood;
    use crate::validation::validate_levels;
    use proptest::prelude::*;

    fn input(c: i64, p: i64, f: i64, carb: i64) -> NutritionInput {
        validate_levels(c, p, f, carb).unwrap()
    }

    #[test]
    fn test_reference_cases() {
        let engine = MoodEngine::default();

        assert_eq!(engine.predict(&input(3, 2, 3, 3)).mood_prediction.mood, Mood::Energizing);
        assert_eq!(engine.predict(&input(2, 2, 0, 0)).mood_prediction.mood, Mood::Balanced);
        assert_eq!(engine.predict(&input(0, 3, 0, 1)).mood_prediction.mood, Mood::Focused);

        let idle = engine.predict(&input(0, 0, 0, 0));
        assert_eq!(idle.mood_prediction.mood, Mood::Balanced);
        assert_eq!(idle.mood_prediction.confidence, FIXED_CONFIDENCE);
    }

    #[test]
    fn test_every_input_yields_recommendations() {
        let engine = MoodEngine::default();
        for input in NutritionInput::all() {
            let response = engine.predict(&input);
            assert!(!response.food_recommendations.is_empty(), "{:?}", input);
            assert!(response.food_recommendations.len() <= DEFAULT_MAX_RECOMMENDATIONS);
            let confidence = response.mood_prediction.confidence;
            assert!(confidence > 0.0 && confidence <= 1.0);
        }
    }

    #[test]
    fn test_predicted_mood_foods_come_first() {
        let engine = MoodEngine::default();
        let response = engine.predict(&input(3, 3, 0, 0));
        assert_eq!(response.food_recommendations[0].mood_category, Mood::Energizing);
    }

    #[test]
    fn test_custom_empty_catalog_still_recommends() {
        let engine = MoodEngine::with_catalog(EngineConfig::default(), FoodCatalog::default());
        let response = engine.predict(&input(0, 0, 3, 3));
        assert_eq!(response.mood_prediction.mood, Mood::Calming);
        assert_eq!(response.food_recommendations.len(), 1);
        assert_eq!(response.food_recommendations[0].mood_category, Mood::Calming);
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"confidence_mode":"rule_margin"}"#).unwrap();
        assert_eq!(config.confidence_mode, ConfidenceMode::RuleMargin);
        assert_eq!(config.max_recommendations, DEFAULT_MAX_RECOMMENDATIONS);
        assert_eq!(config.summary_locale, Locale::Indonesian);
    }

    #[test]
    fn test_summarize_uses_configured_locale() {
        let engine = MoodEngine::new(EngineConfig {
            summary_locale: Locale::English,
            ..EngineConfig::default()
        });
        assert!(engine.summarize(&input(3, 3, 3, 3)).starts_with("Calories: High"));
        assert!(engine
            .summarize_in(&input(3, 3, 3, 3), Locale::Indonesian)
            .starts_with("Kalori: Tinggi"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_predict_is_deterministic(c in 0i64..=3, p in 0i64..=3, f in 0i64..=3, carb in 0i64..=3, margin in any::<bool>()) {
            let config = EngineConfig {
                confidence_mode: if margin { ConfidenceMode::RuleMargin } else { ConfidenceMode::Fixed },
                ..EngineConfig::default()
            };
            let engine = MoodEngine::new(config);
            let input = input(c, p, f, carb);

            let first = serde_json::to_vec(&engine.predict(&input)).unwrap();
            let second = serde_json::to_vec(&engine.predict(&input)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
