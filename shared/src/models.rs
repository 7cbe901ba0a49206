//! Domain models for the NutriMood engine
//!
//! Everything in this module is plain data. Invalid nutrition inputs are
//! unrepresentable: a `NutritionInput` can only hold levels 0-3.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest ordinal a nutrition level may take
pub const MAX_LEVEL: u8 = 3;

/// Ordinal nutrition level, 0 = lowest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum NutrientLevel {
    VeryLow = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl NutrientLevel {
    /// All levels in ascending order
    pub const ALL: [NutrientLevel; 4] = [
        NutrientLevel::VeryLow,
        NutrientLevel::Low,
        NutrientLevel::Medium,
        NutrientLevel::High,
    ];

    /// Numeric value of the level (0-3)
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Build a level from a whole number, `None` outside 0-3
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(NutrientLevel::VeryLow),
            1 => Some(NutrientLevel::Low),
            2 => Some(NutrientLevel::Medium),
            3 => Some(NutrientLevel::High),
            _ => None,
        }
    }
}

impl From<NutrientLevel> for u8 {
    fn from(level: NutrientLevel) -> Self {
        level.value()
    }
}

impl TryFrom<u8> for NutrientLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        NutrientLevel::from_value(i64::from(value))
            .ok_or_else(|| format!("nutrition level {} is outside 0-{}", value, MAX_LEVEL))
    }
}

/// The four nutrients a user reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Calorie,
    Protein,
    Fat,
    Carbohydrate,
}

impl Nutrient {
    /// Nutrients in request field order
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calorie,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbohydrate,
    ];

    /// JSON field carrying this nutrient's level
    pub fn field_name(self) -> &'static str {
        match self {
            Nutrient::Calorie => "calorie_level",
            Nutrient::Protein => "protein_level",
            Nutrient::Fat => "fat_level",
            Nutrient::Carbohydrate => "carb_level",
        }
    }
}

/// Self-reported nutrition levels, the entire input of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NutritionInput {
    pub calorie_level: NutrientLevel,
    pub protein_level: NutrientLevel,
    pub fat_level: NutrientLevel,
    pub carb_level: NutrientLevel,
}

impl NutritionInput {
    pub fn new(
        calorie_level: NutrientLevel,
        protein_level: NutrientLevel,
        fat_level: NutrientLevel,
        carb_level: NutrientLevel,
    ) -> Self {
        Self {
            calorie_level,
            protein_level,
            fat_level,
            carb_level,
        }
    }

    /// Level reported for a nutrient
    #[inline]
    pub fn level(&self, nutrient: Nutrient) -> NutrientLevel {
        match nutrient {
            Nutrient::Calorie => self.calorie_level,
            Nutrient::Protein => self.protein_level,
            Nutrient::Fat => self.fat_level,
            Nutrient::Carbohydrate => self.carb_level,
        }
    }

    /// Levels as plain numbers, in `Nutrient::ALL` order
    pub fn profile(&self) -> [u8; 4] {
        Nutrient::ALL.map(|n| self.level(n).value())
    }

    /// Every one of the 256 possible inputs
    pub fn all() -> impl Iterator<Item = NutritionInput> {
        NutrientLevel::ALL.into_iter().flat_map(|c| {
            NutrientLevel::ALL.into_iter().flat_map(move |p| {
                NutrientLevel::ALL.into_iter().flat_map(move |f| {
                    NutrientLevel::ALL
                        .into_iter()
                        .map(move |carb| NutritionInput::new(c, p, f, carb))
                })
            })
        })
    }
}

/// Closed set of predicted moods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Energizing,
    Calming,
    Focused,
    Balanced,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Energizing, Mood::Calming, Mood::Focused, Mood::Balanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Energizing => "energizing",
            Mood::Calming => "calming",
            Mood::Focused => "focused",
            Mood::Balanced => "balanced",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Energizing => "⚡",
            Mood::Calming => "😌",
            Mood::Focused => "🎯",
            Mood::Balanced => "⚖️",
        }
    }

    /// Short description shown next to a prediction
    pub fn description(self) -> &'static str {
        match self {
            Mood::Energizing => "High energy, ready for activity",
            Mood::Calming => "Relaxed and settled",
            Mood::Focused => "Clear-headed and attentive",
            Mood::Balanced => "Steady and even",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "energizing" => Ok(Mood::Energizing),
            "calming" | "relaxing" => Ok(Mood::Calming),
            "focused" | "focusing" => Ok(Mood::Focused),
            "balanced" => Ok(Mood::Balanced),
            other => Err(format!("Unknown mood: {}", other)),
        }
    }
}

/// Predicted mood with its confidence in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodPrediction {
    pub mood: Mood,
    pub confidence: f64,
}

/// One recommended food with its macro profile per serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecommendation {
    pub food_name: String,
    /// kcal
    pub calories: f64,
    /// grams
    pub proteins: f64,
    /// grams
    pub fats: f64,
    /// grams
    pub carbohydrates: f64,
    pub similarity_score: f64,
    pub mood_category: Mood,
}

/// Complete engine output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlResponse {
    pub mood_prediction: MoodPrediction,
    pub food_recommendations: Vec<FoodRecommendation>,
}
