//! Process-local assessment store
//!
//! Used when `persistence.backend = "memory"` and by tests. Data is lost
//! on restart and the tables are unbounded, so production configuration
//! rejects this backend.

use super::{AssessmentRecord, AssessmentStore, NewAssessment, RecommendationRecord};
use crate::error::PersistenceError;
use async_trait::async_trait;
use chrono::Utc;
use nutrimood_shared::FoodRecommendation;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    assessments: Vec<AssessmentRecord>,
    recommendations: Vec<RecommendationRecord>,
}

#[derive(Default)]
pub struct InMemoryAssessmentStore {
    tables: RwLock<Tables>,
}

impl InMemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored assessments
    pub fn assessment_count(&self) -> usize {
        self.read().map(|t| t.assessments.len()).unwrap_or(0)
    }

    /// Number of stored recommendations
    pub fn recommendation_count(&self) -> usize {
        self.read().map(|t| t.recommendations.len()).unwrap_or(0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, PersistenceError> {
        self.tables
            .read()
            .map_err(|_| PersistenceError::Unavailable("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, PersistenceError> {
        self.tables
            .write()
            .map_err(|_| PersistenceError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl AssessmentStore for InMemoryAssessmentStore {
    async fn save_assessment(&self, new: NewAssessment) -> Result<AssessmentRecord, PersistenceError> {
        let record = AssessmentRecord {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            input: new.input,
            predicted_mood: new.prediction.mood,
            confidence_score: new.prediction.confidence,
            created_at: Utc::now(),
        };

        self.write()?.assessments.push(record.clone());
        Ok(record)
    }

    async fn save_recommendations(
        &self,
        assessment: &AssessmentRecord,
        recommendations: &[FoodRecommendation],
    ) -> Result<usize, PersistenceError> {
        let mut tables = self.write()?;

        if !tables.assessments.iter().any(|a| a.id == assessment.id) {
            return Err(PersistenceError::Recommendations {
                assessment_id: assessment.id,
                source: anyhow::anyhow!("unknown assessment"),
            });
        }

        let now = Utc::now();
        tables
            .recommendations
            .extend(recommendations.iter().map(|rec| RecommendationRecord {
                id: Uuid::new_v4(),
                assessment_id: assessment.id,
                user_id: assessment.user_id,
                recommendation: rec.clone(),
                created_at: now,
            }));

        Ok(recommendations.len())
    }

    async fn recent_assessments(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AssessmentRecord>, PersistenceError> {
        let limit = usize::try_from(limit).unwrap_or(0);

        // insertion order is chronological
        Ok(self
            .read()?
            .assessments
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn recommendations_for(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<RecommendationRecord>, PersistenceError> {
        // stored in ranked order
        Ok(self
            .read()?
            .recommendations
            .iter()
            .filter(|r| r.assessment_id == assessment_id)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<(), PersistenceError> {
        self.read().map(|_| ())
    }
}
