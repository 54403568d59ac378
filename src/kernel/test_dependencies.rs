// Mock implementations for testing
//
// Provides a scripted captcha verifier and an in-memory review store with
// failure injection, for exercising the pipeline without network or
// database access.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domains::reviews::models::{NewStoredReview, StoredReview};
use crate::kernel::traits::{AuthorReview, BaseCaptchaVerifier, BaseReviewStore};

// =============================================================================
// Mock Captcha Verifier
// =============================================================================

pub struct MockCaptchaVerifier {
    verdict: bool,
    fail: AtomicBool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockCaptchaVerifier {
    /// A verifier that accepts every token
    pub fn passing() -> Self {
        Self::with_verdict(true)
    }

    /// A verifier that rejects every token
    pub fn rejecting() -> Self {
        Self::with_verdict(false)
    }

    pub fn with_verdict(verdict: bool) -> Self {
        Self {
            verdict,
            fail: AtomicBool::new(false),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make every verify call return an Err (transport-level failure)
    pub fn failing(self) -> Self {
        self.fail.store(true, Ordering::SeqCst);
        self
    }

    /// Tokens seen by verify, in call order
    pub fn verified_tokens(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseCaptchaVerifier for MockCaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<bool> {
        self.calls.lock().unwrap().push(token.to_string());

        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("captcha service unavailable"));
        }
        Ok(self.verdict)
    }
}

// =============================================================================
// In-Memory Review Store
// =============================================================================

#[derive(Debug, Clone)]
struct StoredRow {
    id: Uuid,
    review: NewStoredReview,
    seeded: bool,
}

/// In-memory `BaseReviewStore` with per-operation failure switches
pub struct InMemoryReviewStore {
    rows: Arc<Mutex<Vec<StoredRow>>>,
    fail_counts: AtomicBool,
    fail_lists: AtomicBool,
    fail_inserts: AtomicBool,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            fail_counts: AtomicBool::new(false),
            fail_lists: AtomicBool::new(false),
            fail_inserts: AtomicBool::new(false),
        }
    }

    /// Seed a prior published review
    pub fn with_review(
        self,
        broker_id: &str,
        author_id: &str,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        self.rows.lock().unwrap().push(StoredRow {
            id: Uuid::new_v4(),
            review: NewStoredReview {
                broker_id: broker_id.to_string(),
                author_id: author_id.to_string(),
                rating: 4,
                body: body.to_string(),
                flagged: false,
                admin_notes: None,
                published_at: Some(created_at),
                created_at,
            },
            seeded: true,
        });
        self
    }

    pub fn failing_counts(self) -> Self {
        self.fail_counts.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_lists(self) -> Self {
        self.fail_lists.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_inserts(self) -> Self {
        self.fail_inserts.store(true, Ordering::SeqCst);
        self
    }

    /// All rows inserted through the trait (seeded rows excluded)
    pub fn inserted(&self) -> Vec<NewStoredReview> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| !row.seeded)
            .map(|row| row.review.clone())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

impl Default for InMemoryReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseReviewStore for InMemoryReviewStore {
    async fn insert(&self, review: NewStoredReview) -> Result<Uuid> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(anyhow!("insert failed: store unavailable"));
        }

        let id = Uuid::new_v4();
        self.rows.lock().unwrap().push(StoredRow {
            id,
            review,
            seeded: false,
        });
        Ok(id)
    }

    async fn count_since(
        &self,
        broker_id: &str,
        author_id: &str,
        since: DateTime<Utc>,
    ) -> Result<i64> {
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(anyhow!("count failed: store unavailable"));
        }

        let count = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| {
                row.review.broker_id == broker_id
                    && row.review.author_id == author_id
                    && row.review.created_at >= since
            })
            .count();
        Ok(count as i64)
    }

    async fn list_for_author(
        &self,
        broker_id: &str,
        author_id: &str,
    ) -> Result<Vec<AuthorReview>> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(anyhow!("select failed: store unavailable"));
        }

        let rows = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| {
                row.review.broker_id == broker_id && row.review.author_id == author_id
            })
            .map(|row| AuthorReview {
                id: row.id,
                body: row.review.body.clone(),
            })
            .collect();
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoredReview>> {
        let found = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id)
            .map(|row| StoredReview {
                id: row.id,
                broker_id: row.review.broker_id.clone(),
                author_id: row.review.author_id.clone(),
                rating: row.review.rating,
                body: row.review.body.clone(),
                flagged: row.review.flagged,
                admin_notes: row.review.admin_notes.clone(),
                published_at: row.review.published_at,
                created_at: row.review.created_at,
            });
        Ok(found)
    }
}
