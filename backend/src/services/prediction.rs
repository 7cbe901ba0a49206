//! Prediction service
//!
//! Runs the engine for a request and, when the caller is identified, stores
//! the assessment and its recommendations. Storage is best-effort and runs
//! on a detached task: the response never waits for it and is never
//! affected by a slow, failed or panicking write.

use crate::error::PersistenceError;
use crate::repositories::{AssessmentStore, NewAssessment};
use crate::telemetry;
use nutrimood_shared::{validate_nutrition_input, MlResponse, MoodEngine, NutritionInput, ValidationError};
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Metrics label for a write that panicked
pub const PANIC_STAGE: &str = "panic";

/// What happened to the side writes of a prediction
#[derive(Debug)]
pub enum PersistenceOutcome {
    /// Anonymous caller, nothing written
    Skipped,
    Persisted {
        assessment_id: Uuid,
        recommendations: usize,
    },
    /// The assessment write failed; recommendations were not attempted
    AssessmentFailed(PersistenceError),
    /// The assessment exists but its recommendations were not written
    RecommendationsFailed {
        assessment_id: Uuid,
        error: PersistenceError,
    },
}

impl PersistenceOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            PersistenceOutcome::AssessmentFailed(_) | PersistenceOutcome::RecommendationsFailed { .. }
        )
    }

    /// Emit logs and metrics for this outcome
    pub fn record(&self, user_id: Option<Uuid>) {
        match self {
            PersistenceOutcome::Skipped => debug!("Anonymous prediction, persistence skipped"),
            PersistenceOutcome::Persisted {
                assessment_id,
                recommendations,
            } => info!(
                user_id = ?user_id,
                assessment_id = %assessment_id,
                recommendations,
                "Assessment saved"
            ),
            PersistenceOutcome::AssessmentFailed(error) => {
                warn!(user_id = ?user_id, error = %error, "Error saving assessment");
                telemetry::persistence_failed(error.stage());
            }
            PersistenceOutcome::RecommendationsFailed {
                assessment_id,
                error,
            } => {
                warn!(
                    user_id = ?user_id,
                    assessment_id = %assessment_id,
                    error = %error,
                    "Error saving recommendations"
                );
                telemetry::persistence_failed(error.stage());
            }
        }
    }
}

/// Prediction service for business logic
pub struct PredictionService;

impl PredictionService {
    /// Validate an untyped request body and run the engine
    pub fn predict(engine: &MoodEngine, body: &Value) -> Result<(NutritionInput, MlResponse), ValidationError> {
        let input = validate_nutrition_input(body).map_err(|err| {
            debug!(field = ?err.field, issue = ?err.issue, "Rejected nutrition input");
            telemetry::validation_failed();
            err
        })?;

        let response = engine.predict(&input);
        telemetry::prediction_made(response.mood_prediction.mood);
        Ok((input, response))
    }

    /// Store a prediction in the background
    ///
    /// Returns `None` for anonymous callers. Otherwise the handle resolves
    /// once the outcome has been logged; a panic inside the store is logged
    /// and counted instead of propagating.
    pub fn spawn_persist(
        store: Arc<dyn AssessmentStore>,
        user_id: Option<Uuid>,
        input: NutritionInput,
        response: MlResponse,
    ) -> Option<JoinHandle<()>> {
        let Some(user_id) = user_id else {
            PersistenceOutcome::Skipped.record(None);
            return None;
        };

        let write = tokio::spawn(async move {
            Self::persist(store.as_ref(), Some(user_id), input, &response).await
        });

        Some(tokio::spawn(async move {
            match write.await {
                Ok(outcome) => outcome.record(Some(user_id)),
                Err(e) if e.is_panic() => {
                    error!(user_id = %user_id, "Assessment write panicked");
                    telemetry::persistence_failed(PANIC_STAGE);
                }
                Err(e) => warn!(user_id = %user_id, error = %e, "Assessment write cancelled"),
            }
        }))
    }

    /// Store an already-computed prediction for an identified user
    ///
    /// Never fails: every error is folded into the returned outcome.
    pub async fn persist(
        store: &dyn AssessmentStore,
        user_id: Option<Uuid>,
        input: NutritionInput,
        response: &MlResponse,
    ) -> PersistenceOutcome {
        let Some(user_id) = user_id else {
            return PersistenceOutcome::Skipped;
        };

        let new = NewAssessment {
            user_id,
            input,
            prediction: response.mood_prediction,
        };

        let assessment = match store.save_assessment(new).await {
            Ok(assessment) => assessment,
            Err(error) => return PersistenceOutcome::AssessmentFailed(error),
        };

        match store
            .save_recommendations(&assessment, &response.food_recommendations)
            .await
        {
            Ok(recommendations) => PersistenceOutcome::Persisted {
                assessment_id: assessment.id,
                recommendations,
            },
            Err(error) => PersistenceOutcome::RecommendationsFailed {
                assessment_id: assessment.id,
                error,
            },
        }
    }
}
