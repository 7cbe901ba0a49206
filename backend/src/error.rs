//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nutrimood_shared::types::{ErrorDetail, ErrorResponse};
use nutrimood_shared::ValidationError;
use thiserror::Error;
use tracing::error;

/// Message returned for any unexpected failure of the prediction endpoint
pub const PREDICTION_FAILURE_MESSAGE: &str = "Internal server error during ML prediction";

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Prediction failed")]
    Prediction(#[source] anyhow::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Storage error")]
    Persistence(#[from] PersistenceError),
}

/// Failure writing or reading assessment records
///
/// Writes made on behalf of a prediction are best-effort: these errors are
/// logged and never reach the caller of the prediction endpoint.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to save assessment: {0}")]
    Assessment(#[source] anyhow::Error),

    #[error("failed to save recommendations for assessment {assessment_id}: {source}")]
    Recommendations {
        assessment_id: uuid::Uuid,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to load assessments: {0}")]
    Query(#[source] anyhow::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    /// Label used in logs and metrics
    pub fn stage(&self) -> &'static str {
        match self {
            PersistenceError::Assessment(_) => "assessment",
            PersistenceError::Recommendations { .. } => "recommendations",
            PersistenceError::Query(_) => "query",
            PersistenceError::Unavailable(_) => "unavailable",
        }
    }
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        PersistenceError::Query(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match &self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                err.to_string(),
                err.field.map(str::to_string),
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone(), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            ApiError::Prediction(err) => {
                error!("Prediction error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PREDICTION_ERROR",
                    PREDICTION_FAILURE_MESSAGE.to_string(),
                    None,
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            ApiError::Persistence(err) => {
                error!("Storage error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use nutrimood_shared::{ValidationIssue, NUTRITION_LEVELS_MESSAGE};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_status() {
        let error = ApiError::from(ValidationError::new("calorie_level", ValidationIssue::OutOfRange));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], NUTRITION_LEVELS_MESSAGE);
        assert_eq!(body["error"]["field"], "calorie_level");
    }

    #[tokio::test]
    async fn test_prediction_error_is_generic() {
        let error = ApiError::Prediction(anyhow::anyhow!("catalog exploded"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], PREDICTION_FAILURE_MESSAGE);
        assert!(!body.to_string().contains("exploded"));
    }

    #[test]
    fn test_unauthorized_error_status() {
        let error = ApiError::Unauthorized("Invalid token".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_persistence_error_stage() {
        let err = PersistenceError::Recommendations {
            assessment_id: uuid::Uuid::nil(),
            source: anyhow::anyhow!("constraint violation"),
        };
        assert_eq!(err.stage(), "recommendations");
        assert!(err.to_string().contains("constraint violation"));
    }
}
