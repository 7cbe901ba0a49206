//! Recommendation selection and similarity scoring
//!
//! A food's macros are projected onto the same 0-3 scale as the user's
//! nutrition levels; similarity is one minus the normalized euclidean
//! distance between the two profiles.

use crate::catalog::{FoodCatalog, FoodItem};
use crate::models::{FoodRecommendation, Mood, NutritionInput, MAX_LEVEL};

/// Macro amounts mapped to the top level, in `Nutrient::ALL` order
const LEVEL_REFERENCE: [f64; 4] = [700.0, 35.0, 35.0, 90.0];

/// Score weight for foods that are compatible but not a mood match
const COMPATIBLE_MOOD_WEIGHT: f64 = 0.75;

/// Default number of recommendations returned
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;

const FALLBACK_SIMILARITY: f64 = 0.9;

/// Position of a food's macros on the 0-3 level scale
pub fn food_profile(item: &FoodItem) -> [f64; 4] {
    let macros = [item.calories, item.proteins, item.fats, item.carbohydrates];
    let top = f64::from(MAX_LEVEL);
    let mut profile = [0.0; 4];
    for (i, value) in macros.iter().enumerate() {
        profile[i] = (value / LEVEL_REFERENCE[i] * top).clamp(0.0, top);
    }
    profile
}

/// Similarity in [0, 1] between a food and the reported levels
pub fn similarity(input: &NutritionInput, item: &FoodItem) -> f64 {
    let top = f64::from(MAX_LEVEL);
    let max_distance = (4.0 * top * top).sqrt();

    let distance = input
        .profile()
        .iter()
        .zip(food_profile(item))
        .map(|(level, food)| (f64::from(*level) - food).powi(2))
        .sum::<f64>()
        .sqrt();

    (1.0 - distance / max_distance).clamp(0.0, 1.0)
}

/// Whether foods tagged `food` may be offered for a `predicted` mood
pub fn is_compatible(predicted: Mood, food: Mood) -> bool {
    food == predicted || food == Mood::Balanced
}

fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

/// Entry returned when no catalog food fits the predicted mood
pub fn fallback_recommendation(mood: Mood) -> FoodRecommendation {
    FoodRecommendation {
        food_name: "Nasi Goreng".to_string(),
        calories: 350.0,
        proteins: 12.0,
        fats: 15.0,
        carbohydrates: 45.0,
        similarity_score: FALLBACK_SIMILARITY,
        mood_category: mood,
    }
}

/// Ranks catalog foods for a prediction
#[derive(Debug, Clone)]
pub struct RecommendationSelector<'a> {
    catalog: &'a FoodCatalog,
    max_recommendations: usize,
}

impl<'a> RecommendationSelector<'a> {
    /// `max_recommendations` is raised to 1 if zero
    pub fn new(catalog: &'a FoodCatalog, max_recommendations: usize) -> Self {
        Self {
            catalog,
            max_recommendations: max_recommendations.max(1),
        }
    }

    /// Recommendations sorted by descending similarity, never empty
    pub fn select(&self, input: &NutritionInput, mood: Mood) -> Vec<FoodRecommendation> {
        let mut ranked: Vec<FoodRecommendation> = self
            .catalog
            .items()
            .iter()
            .filter(|item| is_compatible(mood, item.mood))
            .map(|item| {
                let weight = if item.mood == mood { 1.0 } else { COMPATIBLE_MOOD_WEIGHT };
                FoodRecommendation {
                    food_name: item.name.clone(),
                    calories: item.calories,
                    proteins: item.proteins,
                    fats: item.fats,
                    carbohydrates: item.carbohydrates,
                    similarity_score: round_score(similarity(input, item) * weight),
                    mood_category: item.mood,
                }
            })
            .collect();

        if ranked.is_empty() {
            return vec![fallback_recommendation(mood)];
        }

        // sort_by is stable, ties keep catalog order
        ranked.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        ranked.truncate(self.max_recommendations);
        ranked
    }
}
