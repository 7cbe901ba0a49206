//! Integration tests for the PostgreSQL assessment store

mod common;

use nutrimood_backend::repositories::{AssessmentStore, NewAssessment, PgAssessmentStore};
use nutrimood_shared::{validate_levels, Mood, MoodEngine};
use uuid::Uuid;

fn new_assessment(user_id: Uuid, levels: [i64; 4]) -> (NewAssessment, nutrimood_shared::MlResponse) {
    let input = validate_levels(levels[0], levels[1], levels[2], levels[3]).unwrap();
    let response = MoodEngine::default().predict(&input);
    (
        NewAssessment {
            user_id,
            input,
            prediction: response.mood_prediction,
        },
        response,
    )
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_save_assessment_and_recommendations() {
    let db = common::TestDb::new().await;
    db.cleanup().await;
    let store = PgAssessmentStore::new(db.pool.clone());
    let user_id = Uuid::new_v4();

    let (new, response) = new_assessment(user_id, [3, 2, 3, 3]);
    let record = store.save_assessment(new).await.unwrap();
    assert_eq!(record.predicted_mood, Mood::Energizing);
    assert!((record.confidence_score - 0.85).abs() < 1e-9);

    let written = store
        .save_recommendations(&record, &response.food_recommendations)
        .await
        .unwrap();
    assert_eq!(written, response.food_recommendations.len());

    let stored = store.recommendations_for(record.id).await.unwrap();
    assert_eq!(stored.len(), written);
    assert_eq!(stored[0].recommendation.food_name, response.food_recommendations[0].food_name);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_tied_scores_read_back_in_ranked_order() {
    let db = common::TestDb::new().await;
    let store = PgAssessmentStore::new(db.pool.clone());

    let (new, response) = new_assessment(Uuid::new_v4(), [0, 0, 0, 0]);
    let record = store.save_assessment(new).await.unwrap();

    // same score for every entry, names reversed alphabetically
    let recs: Vec<_> = ["Zucchini Soup", "Tempe Bacem", "Nasi Uduk", "Bubur Ayam"]
        .iter()
        .map(|name| nutrimood_shared::FoodRecommendation {
            food_name: name.to_string(),
            similarity_score: 0.5,
            ..response.food_recommendations[0].clone()
        })
        .collect();
    store.save_recommendations(&record, &recs).await.unwrap();

    let names: Vec<String> = store
        .recommendations_for(record.id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.recommendation.food_name)
        .collect();
    assert_eq!(names, ["Zucchini Soup", "Tempe Bacem", "Nasi Uduk", "Bubur Ayam"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_recent_assessments_newest_first() {
    let db = common::TestDb::new().await;
    db.cleanup().await;
    let store = PgAssessmentStore::new(db.pool.clone());
    let user_id = Uuid::new_v4();

    let (first, _) = new_assessment(user_id, [0, 0, 0, 0]);
    let (second, _) = new_assessment(user_id, [0, 3, 0, 1]);
    store.save_assessment(first).await.unwrap();
    let second = store.save_assessment(second).await.unwrap();

    let listed = store.recent_assessments(user_id, 1).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, second.id);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_recommendations_for_unknown_assessment_fail() {
    let db = common::TestDb::new().await;
    let store = PgAssessmentStore::new(db.pool.clone());
    let user_id = Uuid::new_v4();

    let (new, response) = new_assessment(user_id, [1, 1, 1, 1]);
    let mut record = store.save_assessment(new).await.unwrap();
    record.id = Uuid::new_v4();

    let err = store
        .save_recommendations(&record, &response.food_recommendations)
        .await
        .unwrap_err();
    assert_eq!(err.stage(), "recommendations");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_health_check() {
    let db = common::TestDb::new().await;
    let store = PgAssessmentStore::new(db.pool.clone());

    assert!(store.health_check().await.is_ok());
}
