//! NutriMood Shared Library
//!
//! This crate contains the mood and recommendation engine together with the
//! types and validation shared by the backend and WASM modules.

pub mod catalog;
pub mod classifier;
pub mod engine;
pub mod errors;
pub mod models;
pub mod recommend;
pub mod summary;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use catalog::{FoodCatalog, FoodItem};
pub use classifier::{ConfidenceMode, MoodClassifier, FIXED_CONFIDENCE};
pub use engine::{EngineConfig, MoodEngine};
pub use errors::*;
pub use models::*;
pub use summary::{format_nutrition_summary, Locale};
pub use validation::{validate_levels, validate_nutrition_input};
