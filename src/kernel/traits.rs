// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no moderation policy. Policy
// (fail open vs fail closed, thresholds, disposition) lives in the
// activities that consume these traits.
//
// Naming convention: Base* for trait names (e.g. BaseReviewStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domains::reviews::models::{NewStoredReview, StoredReview};

// =============================================================================
// Captcha Verifier Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseCaptchaVerifier: Send + Sync {
    /// Verify a client-supplied captcha token against the provider.
    /// Implementations map transport failures to `Ok(false)`; the
    /// orchestrator additionally treats `Err` as unverified (fail closed).
    async fn verify(&self, token: &str) -> Result<bool>;
}

// =============================================================================
// Review Store Trait (Infrastructure)
// =============================================================================

/// A prior review row, as needed for duplicate comparison
#[derive(Debug, Clone, FromRow)]
pub struct AuthorReview {
    pub id: Uuid,
    pub body: String,
}

#[async_trait]
pub trait BaseReviewStore: Send + Sync {
    /// Insert a review row, returning its id
    async fn insert(&self, review: NewStoredReview) -> Result<Uuid>;

    /// Count the author's reviews for a broker created at or after `since`
    async fn count_since(
        &self,
        broker_id: &str,
        author_id: &str,
        since: DateTime<Utc>,
    ) -> Result<i64>;

    /// All of the author's prior reviews for a broker (id + body)
    async fn list_for_author(&self, broker_id: &str, author_id: &str)
        -> Result<Vec<AuthorReview>>;

    /// Fetch one stored review by id (the caller reads back what the
    /// pipeline persisted, e.g. to render the pending-moderation state)
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredReview>>;
}
