//! Near-duplicate detection against the author's own review history.

use uuid::Uuid;

use crate::common::fingerprint::{fingerprint, similarity};
use crate::kernel::ModerationDeps;

/// Result of a duplicate check
#[derive(Debug, Clone)]
pub struct DuplicateCheck {
    pub is_duplicate: bool,
    /// Id of the first prior review that crossed the threshold
    pub similar_review_id: Option<Uuid>,
}

impl DuplicateCheck {
    fn clear() -> Self {
        Self {
            is_duplicate: false,
            similar_review_id: None,
        }
    }
}

/// Compare the submission fingerprint against the author's prior reviews
/// for the same broker
///
/// Scoped to the submitting author's own history only; cross-user
/// similarity is never consulted. Prior fingerprints are recomputed from
/// the stored bodies (they are not persisted). The threshold is
/// inclusive: similarity exactly at it counts as a duplicate.
///
/// Fails open on a store error, same availability tradeoff as the rate
/// limiter.
pub async fn check_duplicate(
    broker_id: &str,
    author_id: &str,
    submission_fingerprint: u32,
    deps: &ModerationDeps,
) -> DuplicateCheck {
    let prior = match deps.store.list_for_author(broker_id, author_id).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(
                error = %e,
                broker_id,
                author_id,
                "Duplicate query failed, failing open"
            );
            return DuplicateCheck::clear();
        }
    };

    for review in prior {
        let score = similarity(submission_fingerprint, fingerprint(&review.body));
        if score >= deps.duplicate_threshold {
            return DuplicateCheck {
                is_duplicate: true,
                similar_review_id: Some(review.id),
            };
        }
    }

    DuplicateCheck::clear()
}
