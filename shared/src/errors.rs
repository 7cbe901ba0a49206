//! Error types for the NutriMood engine

use thiserror::Error;

/// Message returned to callers for any malformed nutrition input
pub const NUTRITION_LEVELS_MESSAGE: &str = "All nutrition levels must be integers between 0 and 3";

/// Why a nutrition field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The request body was not a JSON object
    NotAnObject,
    Missing,
    NotANumber,
    NotAWholeNumber,
    OutOfRange,
}

/// Nutrition input failed validation
///
/// The display text is always the caller-facing message; `field` and
/// `issue` are kept for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", NUTRITION_LEVELS_MESSAGE)]
pub struct ValidationError {
    pub field: Option<&'static str>,
    pub issue: ValidationIssue,
}

impl ValidationError {
    pub fn new(field: &'static str, issue: ValidationIssue) -> Self {
        Self {
            field: Some(field),
            issue,
        }
    }

    pub fn not_an_object() -> Self {
        Self {
            field: None,
            issue: ValidationIssue::NotAnObject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_caller_message() {
        let err = ValidationError::new("fat_level", ValidationIssue::OutOfRange);
        assert_eq!(err.to_string(), NUTRITION_LEVELS_MESSAGE);
        assert_eq!(err.field, Some("fat_level"));
    }
}
