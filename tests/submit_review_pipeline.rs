// End-to-end pipeline scenarios over the mock dependencies.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use reviews_core::common::pii::PiiFilter;
use reviews_core::common::profanity::ProfanityFilter;
use reviews_core::config::ModerationConfig;
use reviews_core::domains::reviews::models::ReviewSubmission;
use reviews_core::domains::reviews::submit_review;
use reviews_core::kernel::{
    BaseReviewStore, InMemoryReviewStore, MockCaptchaVerifier, ModerationDeps,
};

const BROKER: &str = "alpha-markets";
const AUTHOR: &str = "user-42";

fn pipeline(
    store: InMemoryReviewStore,
    captcha: MockCaptchaVerifier,
) -> (ModerationDeps, Arc<InMemoryReviewStore>) {
    let store = Arc::new(store);
    let deps = ModerationDeps::new(
        store.clone(),
        Arc::new(captcha),
        Arc::new(ProfanityFilter::new()),
        PiiFilter::default(),
        &ModerationConfig::default(),
    );
    (deps, store)
}

fn submission(body: &str) -> ReviewSubmission {
    ReviewSubmission::new(4, body, "valid-token")
}

#[tokio::test]
async fn happy_path_persists_published_review() {
    let (deps, store) = pipeline(InMemoryReviewStore::new(), MockCaptchaVerifier::passing());
    let body = "Clean fifty character review body about the broker."; // no flags

    let result = submit_review(BROKER, AUTHOR, submission(body), &deps).await;

    assert!(result.success);
    assert!(!result.flagged);
    assert!(result.review_id.is_some());
    assert!(result.error.is_none());
    assert!(result.admin_notes.is_none());

    let rows = store.inserted();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].body, body);
    assert!(!rows[0].flagged);
    assert!(rows[0].published_at.is_some());
    assert!(rows[0].admin_notes.is_none());
}

#[tokio::test]
async fn captcha_failure_rejects_without_insert() {
    let (deps, store) = pipeline(InMemoryReviewStore::new(), MockCaptchaVerifier::rejecting());

    let result = submit_review(BROKER, AUTHOR, submission("A decent enough broker overall."), &deps).await;

    assert!(!result.success);
    assert!(result.error.unwrap().to_lowercase().contains("captcha"));
    assert_eq!(store.row_count(), 0);
}

#[tokio::test]
async fn captcha_transport_error_fails_closed() {
    let (deps, store) = pipeline(
        InMemoryReviewStore::new(),
        MockCaptchaVerifier::passing().failing(),
    );

    let result = submit_review(BROKER, AUTHOR, submission("A decent enough broker overall."), &deps).await;

    assert!(!result.success);
    assert_eq!(store.row_count(), 0);
}

#[tokio::test]
async fn over_limit_rejected_with_count_in_message() {
    let now = Utc::now();
    let mut store = InMemoryReviewStore::new();
    for i in 0..3 {
        store = store.with_review(
            BROKER,
            AUTHOR,
            &format!("an earlier review about spreads number {}", i),
            now - Duration::hours(i),
        );
    }
    let (deps, store) = pipeline(store, MockCaptchaVerifier::passing());

    let result = submit_review(
        BROKER,
        AUTHOR,
        submission("A fourth review inside the same day window."),
        &deps,
    )
    .await;

    assert!(!result.success);
    assert!(result.error.unwrap().contains('3'));
    assert_eq!(store.row_count(), 3);
}

#[tokio::test]
async fn two_prior_reviews_still_accepted() {
    let now = Utc::now();
    let store = InMemoryReviewStore::new()
        .with_review(BROKER, AUTHOR, "an earlier review about their spreads", now)
        .with_review(BROKER, AUTHOR, "an earlier review about withdrawals", now);
    let (deps, store) = pipeline(store, MockCaptchaVerifier::passing());

    let result = submit_review(
        BROKER,
        AUTHOR,
        submission("A third review, different content this time."),
        &deps,
    )
    .await;

    assert!(result.success);
    assert_eq!(store.row_count(), 3);
}

#[tokio::test]
async fn rate_limit_outage_fails_open() {
    let (deps, store) = pipeline(
        InMemoryReviewStore::new().failing_counts(),
        MockCaptchaVerifier::passing(),
    );

    let result = submit_review(BROKER, AUTHOR, submission("Review during a database outage."), &deps).await;

    assert!(result.success);
    assert_eq!(store.row_count(), 1);
}

#[tokio::test]
async fn duplicate_submission_rejected() {
    let body = "Withdrawals took three weeks and support went completely silent.";
    let store = InMemoryReviewStore::new().with_review(BROKER, AUTHOR, body, Utc::now());
    let (deps, store) = pipeline(store, MockCaptchaVerifier::passing());

    let result = submit_review(BROKER, AUTHOR, submission(body), &deps).await;

    assert!(!result.success);
    assert!(result.error.unwrap().to_lowercase().contains("resembles"));
    assert_eq!(store.row_count(), 1);
}

#[tokio::test]
async fn duplicate_outage_fails_open() {
    let body = "Withdrawals took three weeks and support went completely silent.";
    let store = InMemoryReviewStore::new()
        .with_review(BROKER, AUTHOR, body, Utc::now() - Duration::hours(30))
        .failing_lists();
    let (deps, store) = pipeline(store, MockCaptchaVerifier::passing());

    let result = submit_review(BROKER, AUTHOR, submission(body), &deps).await;

    assert!(result.success);
    assert_eq!(store.row_count(), 2);
}

#[tokio::test]
async fn profane_content_stored_masked_and_held() {
    let (deps, store) = pipeline(InMemoryReviewStore::new(), MockCaptchaVerifier::passing());

    let result = submit_review(
        BROKER,
        AUTHOR,
        submission("Honestly this broker is a scam, stay away."),
        &deps,
    )
    .await;

    // Content flags never reject; the review is stored but held
    assert!(result.success);
    assert!(result.flagged);
    assert!(result.admin_notes.as_deref().unwrap().contains("profanity"));

    let rows = store.inserted();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].flagged);
    assert!(rows[0].published_at.is_none());
    assert!(!rows[0].body.contains("scam"));
    assert!(rows[0].body.contains("****"));
}

#[tokio::test]
async fn pii_content_redacted_and_held() {
    let (deps, store) = pipeline(InMemoryReviewStore::new(), MockCaptchaVerifier::passing());

    let result = submit_review(
        BROKER,
        AUTHOR,
        submission("Bad experience, contact me at jane@example.com please."),
        &deps,
    )
    .await;

    assert!(result.success);
    assert!(result.flagged);
    assert!(result.admin_notes.as_deref().unwrap().contains("email"));

    let rows = store.inserted();
    assert!(!rows[0].body.contains("jane@example.com"));
    assert!(rows[0].body.contains("[REDACTED]"));
    assert!(rows[0].published_at.is_none());
}

#[tokio::test]
async fn profanity_and_pii_combined_notes() {
    let (deps, store) = pipeline(InMemoryReviewStore::new(), MockCaptchaVerifier::passing());

    let result = submit_review(
        BROKER,
        AUTHOR,
        submission("Total fraud, my name is Jane Doe, email jane@example.com."),
        &deps,
    )
    .await;

    assert!(result.success);
    assert!(result.flagged);
    let notes = result.admin_notes.unwrap();
    assert!(notes.contains("Contains profanity"));
    assert!(notes.contains("Contains PII:"));
    assert!(notes.contains("email"));
    assert!(notes.contains("names"));

    let body = &store.inserted()[0].body;
    assert!(!body.to_lowercase().contains("fraud"));
    assert!(!body.contains("jane@example.com"));
    assert!(!body.contains("Jane Doe"));
}

#[tokio::test]
async fn flag_implies_hold_invariant() {
    let (deps, store) = pipeline(InMemoryReviewStore::new(), MockCaptchaVerifier::passing());

    let bodies = [
        "Clean review body with nothing to flag at all.",
        "This broker is a scam and everyone should know.",
        "Reach me directly at jane@example.com for proof.",
    ];
    for body in bodies {
        submit_review(BROKER, AUTHOR, submission(body), &deps).await;
    }

    for row in store.inserted() {
        assert_eq!(row.flagged, row.published_at.is_none());
    }
}

#[tokio::test]
async fn stored_review_readable_after_submit() {
    let (deps, store) = pipeline(InMemoryReviewStore::new(), MockCaptchaVerifier::passing());

    let result = submit_review(
        BROKER,
        AUTHOR,
        submission("Honestly this broker is a scam, stay away."),
        &deps,
    )
    .await;
    let id = result.review_id.unwrap();

    let stored = store
        .find_by_id(id)
        .await
        .unwrap()
        .expect("persisted review should be readable");
    assert_eq!(stored.id, id);
    assert_eq!(stored.broker_id, BROKER);
    assert_eq!(stored.author_id, AUTHOR);
    assert!(stored.flagged);
    assert!(stored.published_at.is_none());
    assert!(stored.body.contains("****"));

    let missing = store.find_by_id(Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn persistence_failure_returns_generic_error() {
    let (deps, store) = pipeline(
        InMemoryReviewStore::new().failing_inserts(),
        MockCaptchaVerifier::passing(),
    );

    let result = submit_review(BROKER, AUTHOR, submission("A review that will fail to persist."), &deps).await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Failed to submit review."));
    assert_eq!(store.row_count(), 0);
}

#[tokio::test]
async fn validation_rejects_without_running_pipeline() {
    let (deps, store) = pipeline(InMemoryReviewStore::new(), MockCaptchaVerifier::passing());

    // Body too short
    let result = submit_review(BROKER, AUTHOR, ReviewSubmission::new(4, "too short", "tok"), &deps).await;
    assert!(!result.success);

    // Rating out of range
    let result = submit_review(
        BROKER,
        AUTHOR,
        ReviewSubmission::new(0, "A body of acceptable length here.", "tok"),
        &deps,
    )
    .await;
    assert!(!result.success);

    // Missing captcha token
    let result = submit_review(
        BROKER,
        AUTHOR,
        ReviewSubmission::new(4, "A body of acceptable length here.", ""),
        &deps,
    )
    .await;
    assert!(!result.success);

    assert_eq!(store.row_count(), 0);
}
