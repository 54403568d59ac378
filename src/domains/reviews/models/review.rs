use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::common::fingerprint::fingerprint;

/// Rating bounds accepted from the submission form
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Body length bounds, in characters
pub const MIN_BODY_CHARS: usize = 10;
pub const MAX_BODY_CHARS: usize = 1000;

/// An incoming review submission, alive for one pipeline run
#[derive(Debug, Clone)]
pub struct ReviewSubmission {
    pub rating: i32,
    pub body: String,
    pub captcha_token: String,
    /// 32-bit similarity fingerprint of the body, computed at construction
    pub fingerprint: u32,
}

impl ReviewSubmission {
    pub fn new(rating: i32, body: impl Into<String>, captcha_token: impl Into<String>) -> Self {
        let body = body.into();
        let fingerprint = fingerprint(&body);
        Self {
            rating,
            body,
            captcha_token: captcha_token.into(),
            fingerprint,
        }
    }

    /// Pre-submission validation contract: rating in [1,5], body length in
    /// [10,1000] characters, non-empty captcha token
    pub fn validate(&self) -> Result<(), RejectReason> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(RejectReason::Validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let body_chars = self.body.chars().count();
        if !(MIN_BODY_CHARS..=MAX_BODY_CHARS).contains(&body_chars) {
            return Err(RejectReason::Validation(format!(
                "Review must be between {} and {} characters",
                MIN_BODY_CHARS, MAX_BODY_CHARS
            )));
        }

        if self.captcha_token.is_empty() {
            return Err(RejectReason::Validation(
                "Captcha token is required".to_string(),
            ));
        }

        Ok(())
    }
}

/// A persisted review row (`reviews` table contract)
///
/// `(broker_id, author_id)` is not unique; an author may review the same
/// broker repeatedly, bounded only by the rate limiter. At creation time
/// `published_at` is null exactly when `flagged` is true; a later admin
/// workflow may publish a flagged review, outside this pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredReview {
    pub id: Uuid,
    pub broker_id: String,
    pub author_id: String,
    pub rating: i32,
    pub body: String,
    pub flagged: bool,
    pub admin_notes: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new review row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStoredReview {
    pub broker_id: String,
    pub author_id: String,
    pub rating: i32,
    pub body: String,
    pub flagged: bool,
    pub admin_notes: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Merged verdict from the content classifiers
#[derive(Debug, Clone)]
pub struct ClassifierVerdict {
    pub flag: bool,
    /// Triggered category labels, e.g. "profanity", "pii:email"
    pub categories: Vec<String>,
    pub cleaned_text: String,
}

/// Why a submission was rejected
///
/// The display strings are user-facing; they never leak internals beyond
/// what the rejection policy allows (the rate-limit message carries the
/// observed count, the duplicate message confirms resemblance only
/// against the author's own history).
#[derive(Debug, Error)]
pub enum RejectReason {
    #[error("Captcha verification failed. Please try again.")]
    CaptchaFailed,

    #[error("You have already submitted {count} reviews for this broker in the last {window_hours} hours (limit is {limit}).")]
    RateLimited {
        count: i64,
        limit: i64,
        window_hours: i64,
    },

    #[error("This review closely resembles one you already submitted for this broker.")]
    Duplicate,

    #[error("{0}")]
    Validation(String),

    #[error("Failed to submit review.")]
    Persistence,
}

/// Outcome returned to the caller (the web layer)
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub review_id: Option<Uuid>,
    pub error: Option<String>,
    /// True when the review was stored but held for moderation
    pub flagged: bool,
    pub admin_notes: Option<String>,
}

impl SubmissionResult {
    pub fn accepted(review_id: Uuid, flagged: bool, admin_notes: Option<String>) -> Self {
        Self {
            success: true,
            review_id: Some(review_id),
            error: None,
            flagged,
            admin_notes,
        }
    }

    pub fn rejected(reason: &RejectReason) -> Self {
        Self {
            success: false,
            review_id: None,
            error: Some(reason.to_string()),
            flagged: false,
            admin_notes: None,
        }
    }
}
