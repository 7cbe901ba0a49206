//! PostgreSQL assessment store

use super::{AssessmentRecord, AssessmentStore, NewAssessment, RecommendationRecord};
use crate::error::PersistenceError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nutrimood_shared::{validate_levels, FoodRecommendation, Mood, NutritionInput};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Assessment row from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct AssessmentRow {
    id: Uuid,
    user_id: Uuid,
    calorie_level: i16,
    protein_level: i16,
    fat_level: i16,
    carb_level: i16,
    predicted_mood: String,
    confidence_score: Decimal,
    created_at: DateTime<Utc>,
}

impl TryFrom<AssessmentRow> for AssessmentRecord {
    type Error = anyhow::Error;

    fn try_from(row: AssessmentRow) -> Result<Self, Self::Error> {
        let input = validate_levels(
            row.calorie_level.into(),
            row.protein_level.into(),
            row.fat_level.into(),
            row.carb_level.into(),
        )
        .map_err(|e| anyhow::anyhow!("assessment {} has invalid levels: {:?}", row.id, e))?;

        let predicted_mood: Mood = row
            .predicted_mood
            .parse()
            .map_err(|e: String| anyhow::anyhow!("assessment {}: {}", row.id, e))?;

        Ok(AssessmentRecord {
            id: row.id,
            user_id: row.user_id,
            input,
            predicted_mood,
            confidence_score: decimal_to_f64(&row.confidence_score),
            created_at: row.created_at,
        })
    }
}

/// Recommendation row from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct RecommendationRow {
    id: Uuid,
    assessment_id: Uuid,
    user_id: Uuid,
    food_name: String,
    calories: Decimal,
    proteins: Decimal,
    fats: Decimal,
    carbohydrates: Decimal,
    mood_category: String,
    similarity_score: Decimal,
    created_at: DateTime<Utc>,
}

impl TryFrom<RecommendationRow> for RecommendationRecord {
    type Error = anyhow::Error;

    fn try_from(row: RecommendationRow) -> Result<Self, Self::Error> {
        let mood_category: Mood = row
            .mood_category
            .parse()
            .map_err(|e: String| anyhow::anyhow!("recommendation {}: {}", row.id, e))?;

        Ok(RecommendationRecord {
            id: row.id,
            assessment_id: row.assessment_id,
            user_id: row.user_id,
            recommendation: FoodRecommendation {
                food_name: row.food_name,
                calories: decimal_to_f64(&row.calories),
                proteins: decimal_to_f64(&row.proteins),
                fats: decimal_to_f64(&row.fats),
                carbohydrates: decimal_to_f64(&row.carbohydrates),
                similarity_score: decimal_to_f64(&row.similarity_score),
                mood_category,
            },
            created_at: row.created_at,
        })
    }
}

fn decimal_to_f64(d: &Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

fn f64_to_decimal(value: f64) -> anyhow::Result<Decimal> {
    Decimal::from_f64(value).ok_or_else(|| anyhow::anyhow!("{} cannot be stored as NUMERIC", value))
}

fn level(input: &NutritionInput) -> [i16; 4] {
    input.profile().map(i16::from)
}

/// Assessment store backed by the `nutrition_assessments` and
/// `food_recommendations` tables
#[derive(Clone)]
pub struct PgAssessmentStore {
    pool: PgPool,
}

impl PgAssessmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert_recommendations(
        &self,
        assessment: &AssessmentRecord,
        recommendations: &[FoodRecommendation],
    ) -> anyhow::Result<usize> {
        let mut tx = self.pool.begin().await?;

        for (rank, rec) in recommendations.iter().enumerate() {
            let rank = i16::try_from(rank)?;
            sqlx::query(
                r#"
                INSERT INTO food_recommendations
                    (assessment_id, user_id, food_name, calories, proteins, fats,
                     carbohydrates, mood_category, similarity_score, recommendation_rank)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(assessment.id)
            .bind(assessment.user_id)
            .bind(&rec.food_name)
            .bind(f64_to_decimal(rec.calories)?)
            .bind(f64_to_decimal(rec.proteins)?)
            .bind(f64_to_decimal(rec.fats)?)
            .bind(f64_to_decimal(rec.carbohydrates)?)
            .bind(rec.mood_category.as_str())
            .bind(f64_to_decimal(rec.similarity_score)?)
            .bind(rank)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(recommendations.len())
    }
}

#[async_trait]
impl AssessmentStore for PgAssessmentStore {
    async fn save_assessment(&self, new: NewAssessment) -> Result<AssessmentRecord, PersistenceError> {
        let [calorie, protein, fat, carb] = level(&new.input);
        let confidence = f64_to_decimal(new.prediction.confidence).map_err(PersistenceError::Assessment)?;

        let row = sqlx::query_as::<_, AssessmentRow>(
            r#"
            INSERT INTO nutrition_assessments
                (user_id, calorie_level, protein_level, fat_level, carb_level,
                 predicted_mood, confidence_score)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, calorie_level, protein_level, fat_level, carb_level,
                      predicted_mood, confidence_score, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(calorie)
        .bind(protein)
        .bind(fat)
        .bind(carb)
        .bind(new.prediction.mood.as_str())
        .bind(confidence)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PersistenceError::Assessment(e.into()))?;

        AssessmentRecord::try_from(row).map_err(PersistenceError::Assessment)
    }

    async fn save_recommendations(
        &self,
        assessment: &AssessmentRecord,
        recommendations: &[FoodRecommendation],
    ) -> Result<usize, PersistenceError> {
        if recommendations.is_empty() {
            return Ok(0);
        }

        self.insert_recommendations(assessment, recommendations)
            .await
            .map_err(|source| PersistenceError::Recommendations {
                assessment_id: assessment.id,
                source,
            })
    }

    async fn recent_assessments(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AssessmentRecord>, PersistenceError> {
        let rows = sqlx::query_as::<_, AssessmentRow>(
            r#"
            SELECT id, user_id, calorie_level, protein_level, fat_level, carb_level,
                   predicted_mood, confidence_score, created_at
            FROM nutrition_assessments
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| AssessmentRecord::try_from(row).map_err(PersistenceError::Query))
            .collect()
    }

    async fn recommendations_for(
        &self,
        assessment_id: Uuid,
    ) -> Result<Vec<RecommendationRecord>, PersistenceError> {
        let rows = sqlx::query_as::<_, RecommendationRow>(
            r#"
            SELECT id, assessment_id, user_id, food_name, calories, proteins, fats,
                   carbohydrates, mood_category, similarity_score, created_at
            FROM food_recommendations
            WHERE assessment_id = $1
            ORDER BY recommendation_rank ASC
            "#,
        )
        .bind(assessment_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| RecommendationRecord::try_from(row).map_err(PersistenceError::Query))
            .collect()
    }

    async fn health_check(&self) -> Result<(), PersistenceError> {
        crate::db::health_check(&self.pool)
            .await
            .map_err(|e| PersistenceError::Unavailable(e.to_string()))
    }
}
