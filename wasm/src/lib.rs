//! NutriMood WASM Module
//!
//! This crate provides WebAssembly bindings so the mood engine can run in
//! the browser without a round trip to the backend. Results match the
//! `/api/v1/ml/predict` endpoint byte for byte.

use nutrimood_shared::{
    validate_levels, ConfidenceMode, EngineConfig, Locale, Mood, MoodEngine,
};
use wasm_bindgen::prelude::*;

fn engine(mode: ConfidenceMode) -> MoodEngine {
    MoodEngine::new(EngineConfig {
        confidence_mode: mode,
        ..EngineConfig::default()
    })
}

fn predict_json(
    calorie_level: i32,
    protein_level: i32,
    fat_level: i32,
    carb_level: i32,
    mode: ConfidenceMode,
) -> Result<String, String> {
    let input = validate_levels(
        calorie_level.into(),
        protein_level.into(),
        fat_level.into(),
        carb_level.into(),
    )
    .map_err(|e| e.to_string())?;

    serde_json::to_string(&engine(mode).predict(&input)).map_err(|e| e.to_string())
}

fn summary_text(
    calorie_level: i32,
    protein_level: i32,
    fat_level: i32,
    carb_level: i32,
    locale: &str,
) -> Result<String, String> {
    let locale: Locale = locale.parse()?;
    let input = validate_levels(
        calorie_level.into(),
        protein_level.into(),
        fat_level.into(),
        carb_level.into(),
    )
    .map_err(|e| e.to_string())?;

    Ok(engine(ConfidenceMode::Fixed).summarize_in(&input, locale))
}

/// Predict a mood and recommend foods; returns the response as JSON
#[wasm_bindgen]
pub fn predict(
    calorie_level: i32,
    protein_level: i32,
    fat_level: i32,
    carb_level: i32,
) -> Result<String, JsValue> {
    predict_json(calorie_level, protein_level, fat_level, carb_level, ConfidenceMode::Fixed)
        .map_err(|e| JsValue::from_str(&e))
}

/// Same as `predict`, with confidence derived from how clearly the rule fired
#[wasm_bindgen(js_name = predictWithRuleMargin)]
pub fn predict_with_rule_margin(
    calorie_level: i32,
    protein_level: i32,
    fat_level: i32,
    carb_level: i32,
) -> Result<String, JsValue> {
    predict_json(calorie_level, protein_level, fat_level, carb_level, ConfidenceMode::RuleMargin)
        .map_err(|e| JsValue::from_str(&e))
}

/// Describe the levels in words, e.g. "Kalori: Sedang, ..."
#[wasm_bindgen(js_name = formatSummary)]
pub fn format_summary(
    calorie_level: i32,
    protein_level: i32,
    fat_level: i32,
    carb_level: i32,
    locale: &str,
) -> Result<String, JsValue> {
    summary_text(calorie_level, protein_level, fat_level, carb_level, locale)
        .map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen(js_name = moodEmoji)]
pub fn mood_emoji(mood: &str) -> Option<String> {
    mood.parse::<Mood>().ok().map(|m| m.emoji().to_string())
}

#[wasm_bindgen(js_name = moodDescription)]
pub fn mood_description(mood: &str) -> Option<String> {
    mood.parse::<Mood>().ok().map(|m| m.description().to_string())
}
