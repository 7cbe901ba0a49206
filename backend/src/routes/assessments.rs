//! Assessment history API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repositories::AssessmentRecord;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use nutrimood_shared::types::{AssessmentHistoryResponse, AssessmentResponse};
use nutrimood_shared::FoodRecommendation;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_HISTORY_LIMIT: i64 = 20;

/// Query string of the history endpoint
#[derive(Debug, Default, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

/// Create assessment routes
pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assessments))
        .route("/:id/recommendations", get(list_recommendations))
}

fn limit_error() -> ApiError {
    ApiError::BadRequest("limit must be an integer between 1 and 100".to_string())
}

impl From<AssessmentRecord> for AssessmentResponse {
    fn from(record: AssessmentRecord) -> Self {
        AssessmentResponse {
            id: record.id.to_string(),
            input: record.input,
            predicted_mood: record.predicted_mood,
            confidence_score: record.confidence_score,
            created_at: record.created_at,
        }
    }
}

/// GET /api/v1/assessments - The caller's most recent assessments
///
/// `limit` defaults to 20 and must be an integer in 1..=100.
async fn list_assessments(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<AssessmentHistoryResponse>, ApiError> {
    let Query(query) = query.map_err(|_| limit_error())?;
    query.validate().map_err(|_| limit_error())?;
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let records = state.store().recent_assessments(auth.user_id, limit).await?;

    Ok(Json(AssessmentHistoryResponse {
        items: records.into_iter().map(AssessmentResponse::from).collect(),
        limit,
    }))
}

/// GET /api/v1/assessments/:id/recommendations - Foods stored with an assessment
///
/// Records belonging to other users are filtered out, so a foreign id
/// yields an empty list.
async fn list_recommendations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(assessment_id): Path<Uuid>,
) -> Result<Json<Vec<FoodRecommendation>>, ApiError> {
    let records = state.store().recommendations_for(assessment_id).await?;

    Ok(Json(
        records
            .into_iter()
            .filter(|r| r.user_id == auth.user_id)
            .map(|r| r.recommendation)
            .collect(),
    ))
}
