//! Nutrition summary API route

use crate::error::ApiError;
use crate::state::AppState;
use crate::telemetry;
use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use nutrimood_shared::types::{SummaryQuery, SummaryResponse};
use nutrimood_shared::{validate_nutrition_input, Locale};

use super::prediction::json_body;

/// Create nutrition routes
pub fn nutrition_routes() -> Router<AppState> {
    Router::new().route("/summary", post(summarize))
}

/// Resolve the requested locale, falling back to the configured one
fn resolve_locale(query: &SummaryQuery, default: Locale) -> Result<Locale, ApiError> {
    match query.locale.as_deref() {
        None => Ok(default),
        Some(code) => code
            .parse::<Locale>()
            .map_err(|_| ApiError::BadRequest(format!("Unsupported locale: {}", code))),
    }
}

/// POST /api/v1/nutrition/summary - Describe nutrition levels in words
///
/// Validates the body exactly like the prediction endpoint.
async fn summarize(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
    body: Bytes,
) -> Result<Json<SummaryResponse>, ApiError> {
    let locale = resolve_locale(&query, state.engine().config().summary_locale)?;

    let body = json_body(&body)?;
    let input = validate_nutrition_input(&body).map_err(|err| {
        telemetry::validation_failed();
        err
    })?;

    Ok(Json(SummaryResponse {
        summary: state.engine().summarize_in(&input, locale),
        locale,
        input,
    }))
}
