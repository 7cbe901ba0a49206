//! Human-readable summaries of nutrition input

use crate::models::{Nutrient, NutrientLevel, NutritionInput};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language used for summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    /// Bahasa Indonesia
    #[default]
    #[serde(rename = "id")]
    Indonesian,
    #[serde(rename = "en")]
    English,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::Indonesian => "id",
            Locale::English => "en",
        }
    }

    pub fn nutrient_label(self, nutrient: Nutrient) -> &'static str {
        match (self, nutrient) {
            (Locale::Indonesian, Nutrient::Calorie) => "Kalori",
            (Locale::Indonesian, Nutrient::Protein) => "Protein",
            (Locale::Indonesian, Nutrient::Fat) => "Lemak",
            (Locale::Indonesian, Nutrient::Carbohydrate) => "Karbohidrat",
            (Locale::English, Nutrient::Calorie) => "Calories",
            (Locale::English, Nutrient::Protein) => "Protein",
            (Locale::English, Nutrient::Fat) => "Fat",
            (Locale::English, Nutrient::Carbohydrate) => "Carbohydrates",
        }
    }

    pub fn level_label(self, level: NutrientLevel) -> &'static str {
        match (self, level) {
            (Locale::Indonesian, NutrientLevel::VeryLow) => "Sangat Rendah",
            (Locale::Indonesian, NutrientLevel::Low) => "Rendah",
            (Locale::Indonesian, NutrientLevel::Medium) => "Sedang",
            (Locale::Indonesian, NutrientLevel::High) => "Tinggi",
            (Locale::English, NutrientLevel::VeryLow) => "Very Low",
            (Locale::English, NutrientLevel::Low) => "Low",
            (Locale::English, NutrientLevel::Medium) => "Medium",
            (Locale::English, NutrientLevel::High) => "High",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" | "id-id" | "indonesian" => Ok(Locale::Indonesian),
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::English),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

/// Describe each nutrient and its level, e.g. `Kalori: Sedang, Protein: Tinggi, ...`
pub fn format_nutrition_summary(input: &NutritionInput, locale: Locale) -> String {
    Nutrient::ALL
        .iter()
        .map(|&nutrient| {
            format!(
                "{}: {}",
                locale.nutrient_label(nutrient),
                locale.level_label(input.level(nutrient))
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_levels;

    #[test]
    fn test_indonesian_summary() {
        let input = validate_levels(2, 2, 1, 2).unwrap();
        assert_eq!(
            format_nutrition_summary(&input, Locale::Indonesian),
            "Kalori: Sedang, Protein: Sedang, Lemak: Rendah, Karbohidrat: Sedang"
        );
    }

    #[test]
    fn test_english_summary() {
        let input = validate_levels(0, 3, 1, 2).unwrap();
        assert_eq!(
            format_nutrition_summary(&input, Locale::English),
            "Calories: Very Low, Protein: High, Fat: Low, Carbohydrates: Medium"
        );
    }

    #[test]
    fn test_every_input_formats() {
        for locale in [Locale::Indonesian, Locale::English] {
            let summaries: std::collections::HashSet<_> = NutritionInput::all()
                .map(|input| format_nutrition_summary(&input, locale))
                .collect();
            assert_eq!(summaries.len(), 256);
        }
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!("id".parse::<Locale>().unwrap(), Locale::Indonesian);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(serde_json::to_string(&Locale::English).unwrap(), "\"en\"");
    }
}
