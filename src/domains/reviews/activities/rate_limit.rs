//! Per-author submission rate limiting.

use chrono::Utc;

use crate::kernel::ModerationDeps;

/// Result of a rate-limit check
#[derive(Debug, Clone)]
pub struct RateCheck {
    pub within_limit: bool,
    /// Reviews counted inside the window; 0 when the check failed open
    pub count: i64,
}

/// Count the author's reviews for this broker inside the sliding window
///
/// Fails open: if the store query errors, the submission proceeds with a
/// zero count. Availability is preferred over strict enforcement here;
/// the worst case is a briefly exceeded limit, not lost reviews.
pub async fn check_rate_limit(
    broker_id: &str,
    author_id: &str,
    deps: &ModerationDeps,
) -> RateCheck {
    let since = Utc::now() - deps.rate_window;

    match deps.store.count_since(broker_id, author_id, since).await {
        Ok(count) => RateCheck {
            within_limit: count < deps.rate_limit,
            count,
        },
        Err(e) => {
            tracing::warn!(
                error = %e,
                broker_id,
                author_id,
                "Rate-limit query failed, failing open"
            );
            RateCheck {
                within_limit: true,
                count: 0,
            }
        }
    }
}
