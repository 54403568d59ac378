//! Postgres-backed review store.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::reviews::models::{NewStoredReview, StoredReview};
use crate::kernel::traits::{AuthorReview, BaseReviewStore};

/// `BaseReviewStore` over the `reviews` table
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseReviewStore for PgReviewStore {
    async fn insert(&self, review: NewStoredReview) -> Result<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO reviews
                 (id, broker_id, author_id, rating, body, flagged,
                  admin_notes, published_at, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(Uuid::new_v4())
        .bind(&review.broker_id)
        .bind(&review.author_id)
        .bind(review.rating)
        .bind(&review.body)
        .bind(review.flagged)
        .bind(&review.admin_notes)
        .bind(review.published_at)
        .bind(review.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn count_since(
        &self,
        broker_id: &str,
        author_id: &str,
        since: DateTime<Utc>,
    ) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reviews
             WHERE broker_id = $1 AND author_id = $2 AND created_at >= $3",
        )
        .bind(broker_id)
        .bind(author_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn list_for_author(
        &self,
        broker_id: &str,
        author_id: &str,
    ) -> Result<Vec<AuthorReview>> {
        sqlx::query_as::<_, AuthorReview>(
            "SELECT id, body FROM reviews
             WHERE broker_id = $1 AND author_id = $2
             ORDER BY created_at DESC",
        )
        .bind(broker_id)
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Into::into)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredReview>> {
        sqlx::query_as::<_, StoredReview>(
            "SELECT id, broker_id, author_id, rating, body, flagged,
                    admin_notes, published_at, created_at
             FROM reviews
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Into::into)
    }
}
