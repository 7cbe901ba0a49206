//! Mood prediction API route

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::PredictionService;
use crate::state::AppState;
use crate::telemetry;
use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use nutrimood_shared::{MlResponse, ValidationError};
use serde_json::Value;
use tracing::debug;

/// Create prediction routes
pub fn prediction_routes() -> Router<AppState> {
    Router::new().route("/predict", post(predict))
}

/// Decode a request body as untyped JSON
///
/// Bodies that are not JSON get the same 400 as bad levels.
pub(super) fn json_body(body: &Bytes) -> Result<Value, ValidationError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Request body is not JSON");
        telemetry::validation_failed();
        ValidationError::not_an_object()
    })
}

/// POST /api/v1/ml/predict - Predict mood and recommend foods
///
/// A valid bearer token attaches the caller's identity; the assessment is
/// then stored on a detached task. The response does not wait for it.
async fn predict(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    body: Bytes,
) -> Result<Json<MlResponse>, ApiError> {
    let body = json_body(&body)?;
    let (input, response) = PredictionService::predict(state.engine(), &body)?;

    let user_id = auth.map(|user| user.user_id);
    PredictionService::spawn_persist(state.store.clone(), user_id, input, response.clone());

    Ok(Json(response))
}
