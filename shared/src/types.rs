//! API request and response types shared with clients

use crate::models::{Mood, NutritionInput};
use crate::summary::Locale;
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Query string of the summary endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub locale: Option<String>,
}

/// Nutrition summary response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub locale: Locale,
    pub input: NutritionInput,
}

/// One stored assessment as returned to its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub id: String,
    #[serde(flatten)]
    pub input: NutritionInput,
    pub predicted_mood: Mood,
    pub confidence_score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Assessment history page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentHistoryResponse {
    pub items: Vec<AssessmentResponse>,
    pub limit: i64,
}
