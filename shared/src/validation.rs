//! Input validation for nutrition levels
//!
//! The HTTP and WASM boundaries hand us untyped values; this module is the
//! only way to turn them into a `NutritionInput`.

use crate::errors::{ValidationError, ValidationIssue};
use crate::models::{Nutrient, NutrientLevel, NutritionInput};
use serde_json::Value;

/// Validate a single nutrition level value
///
/// Accepts JSON integers and floats with no fractional part (`2.0`), in 0-3.
pub fn validate_level(field: &'static str, value: &Value) -> Result<NutrientLevel, ValidationError> {
    let number = match value {
        Value::Number(n) => n,
        Value::Null => return Err(ValidationError::new(field, ValidationIssue::Missing)),
        _ => return Err(ValidationError::new(field, ValidationIssue::NotANumber)),
    };

    let whole = if let Some(i) = number.as_i64() {
        i
    } else if number.as_u64().is_some() {
        // larger than i64::MAX
        return Err(ValidationError::new(field, ValidationIssue::OutOfRange));
    } else {
        let f = number
            .as_f64()
            .ok_or_else(|| ValidationError::new(field, ValidationIssue::NotANumber))?;
        if !f.is_finite() || f.fract() != 0.0 {
            return Err(ValidationError::new(field, ValidationIssue::NotAWholeNumber));
        }
        if f < i64::MIN as f64 || f > i64::MAX as f64 {
            return Err(ValidationError::new(field, ValidationIssue::OutOfRange));
        }
        f as i64
    };

    validate_level_value(field, whole)
}

/// Validate an already-integral level
pub fn validate_level_value(field: &'static str, value: i64) -> Result<NutrientLevel, ValidationError> {
    NutrientLevel::from_value(value)
        .ok_or_else(|| ValidationError::new(field, ValidationIssue::OutOfRange))
}

/// Validate an untyped request body into a `NutritionInput`
///
/// All four fields must be present; extra fields are ignored.
pub fn validate_nutrition_input(body: &Value) -> Result<NutritionInput, ValidationError> {
    let object = body.as_object().ok_or_else(ValidationError::not_an_object)?;

    let level = |nutrient: Nutrient| {
        let field = nutrient.field_name();
        match object.get(field) {
            Some(value) => validate_level(field, value),
            None => Err(ValidationError::new(field, ValidationIssue::Missing)),
        }
    };

    Ok(NutritionInput::new(
        level(Nutrient::Calorie)?,
        level(Nutrient::Protein)?,
        level(Nutrient::Fat)?,
        level(Nutrient::Carbohydrate)?,
    ))
}

/// Validate four integral levels, as handed over by the WASM bindings
pub fn validate_levels(
    calorie_level: i64,
    protein_level: i64,
    fat_level: i64,
    carb_level: i64,
) -> Result<NutritionInput, ValidationError> {
    Ok(NutritionInput::new(
        validate_level_value(Nutrient::Calorie.field_name(), calorie_level)?,
        validate_level_value(Nutrient::Protein.field_name(), protein_level)?,
        validate_level_value(Nutrient::Fat.field_name(), fat_level)?,
        validate_level_value(Nutrient::Carbohydrate.field_name(), carb_level)?,
    ))
}
