//! Pipeline dependencies (using traits for testability)
//!
//! The central dependency container handed to the submission activities.
//! External services sit behind trait abstractions; the content filters
//! are immutable configuration objects built once at startup.

use std::sync::Arc;

use chrono::Duration;

use crate::common::pii::PiiFilter;
use crate::common::profanity::ProfanityFilter;
use crate::config::ModerationConfig;
use crate::kernel::traits::{BaseCaptchaVerifier, BaseReviewStore};

/// Dependencies for the review submission pipeline
#[derive(Clone)]
pub struct ModerationDeps {
    pub store: Arc<dyn BaseReviewStore>,
    pub captcha: Arc<dyn BaseCaptchaVerifier>,
    pub profanity: Arc<ProfanityFilter>,
    pub pii: PiiFilter,
    /// Max reviews per (broker, author) inside the sliding window
    pub rate_limit: i64,
    pub rate_window: Duration,
    /// Similarity at or above this is a near-duplicate (inclusive)
    pub duplicate_threshold: f64,
}

impl ModerationDeps {
    pub fn new(
        store: Arc<dyn BaseReviewStore>,
        captcha: Arc<dyn BaseCaptchaVerifier>,
        profanity: Arc<ProfanityFilter>,
        pii: PiiFilter,
        config: &ModerationConfig,
    ) -> Self {
        Self {
            store,
            captcha,
            profanity,
            pii,
            rate_limit: config.rate_limit,
            rate_window: Duration::hours(config.rate_window_hours),
            duplicate_threshold: config.duplicate_threshold,
        }
    }
}
