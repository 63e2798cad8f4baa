//! End-to-end prediction scenario: create, persist, resolve, report.

use brandpipe::core::find_mut;
use brandpipe::{advance, prediction_stats, Outcome, Prediction, PredictionStatus, RecordStore};
use chrono::NaiveDate;
use tempfile::TempDir;

#[tokio::test]
async fn test_prediction_lifecycle_end_to_end() {
    let temp = TempDir::new().unwrap();
    let store: RecordStore<Prediction> = RecordStore::new(temp.path().join("predictions.json"));

    // Submit: "SOL hits 300" at 75%, category crypto, deadline 2026-03-01
    let prediction = Prediction::new(
        "SOL hits 300",
        75,
        "crypto",
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    );
    let id = prediction.id.clone();
    store.append(prediction).await.unwrap();

    let loaded = store.load().await;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].status, PredictionStatus::Active);
    assert_eq!(loaded[0].confidence, 75);

    // Resolve correct
    let mut predictions = store.load().await;
    let p = find_mut(&mut predictions, &id).unwrap();
    advance(p, PredictionStatus::Resolved).unwrap();
    p.outcome = Some(Outcome::Correct);
    p.proof = Some("price chart 2026-02-14".to_string());
    store.save(&predictions).await.unwrap();

    // Reload and verify the terminal state survived persistence
    let reloaded = store.load().await;
    assert_eq!(reloaded[0].status, PredictionStatus::Resolved);
    assert_eq!(reloaded[0].outcome, Some(Outcome::Correct));
    assert!(reloaded[0].resolved_at.is_some());
    assert_eq!(
        reloaded[0].proof.as_deref(),
        Some("price chart 2026-02-14")
    );

    // Stats: accuracy 100.0, resolved 1
    let stats = prediction_stats(&reloaded);
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.accuracy, 100.0);
    assert_eq!(stats.by_category["crypto"].correct, 1);
}

#[tokio::test]
async fn test_unknown_id_is_a_visible_miss() {
    let temp = TempDir::new().unwrap();
    let store: RecordStore<Prediction> = RecordStore::new(temp.path().join("predictions.json"));

    store
        .append(Prediction::new(
            "something",
            50,
            "misc",
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        ))
        .await
        .unwrap();

    let mut predictions = store.load().await;
    assert!(find_mut(&mut predictions, "no-such-id").is_none());
}

#[tokio::test]
async fn test_resolved_prediction_cannot_reactivate() {
    let mut p = Prediction::new(
        "claim",
        60,
        "tech",
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
    );
    advance(&mut p, PredictionStatus::Resolved).unwrap();

    let err = advance(&mut p, PredictionStatus::Active).unwrap_err();
    assert_eq!(err.from, PredictionStatus::Resolved);
    assert_eq!(p.status, PredictionStatus::Resolved);
}
