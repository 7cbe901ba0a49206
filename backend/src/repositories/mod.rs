//! Assessment persistence
//!
//! `AssessmentStore` is the seam between request handling and storage.
//! `PgAssessmentStore` is the production implementation;
//! `InMemoryAssessmentStore` backs local runs and tests.

pub mod assessment;
pub mod memory;

pub use assessment::PgAssessmentStore;
pub use memory::InMemoryAssessmentStore;

use crate::error::PersistenceError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nutrimood_shared::{FoodRecommendation, Mood, MoodPrediction, NutritionInput};
use uuid::Uuid;

/// Assessment to be written
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub user_id: Uuid,
    pub input: NutritionInput,
    pub prediction: MoodPrediction,
}

/// Stored assessment
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub input: NutritionInput,
    pub predicted_mood: Mood,
    pub confidence_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Stored recommendation linked to an assessment
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRecord {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub user_id: Uuid,
    pub recommendation: FoodRecommendation,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Insert an assessment and return it with its generated id
    async fn save_assessment(&self, new: NewAssessment) -> Result<AssessmentRecord, PersistenceError>;

    /// Insert all recommendations for an assessment atomically
    ///
    /// Returns how many rows were written.
    async fn save_recommendations(
        &self,
        assessment: &AssessmentRecord,
        recommendations: &[FoodRecommendation],
    ) -> Result<usize, PersistenceError>;

    /// Most recent assessments of a user, newest first
    async fn recent_assessments(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AssessmentRecord>, PersistenceError>;

    /// Recommendations stored for an assessment, best match first
    async fn recommendations_for(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<RecommendationRecord>, PersistenceError>;

    async fn health_check(&self) -> Result<(), PersistenceError>;
}
