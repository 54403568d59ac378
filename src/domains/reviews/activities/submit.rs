//! Submission orchestrator - the moderation pipeline entry point.
//!
//! Stage order: validate -> captcha -> rate limit -> duplicate ->
//! classify -> persist. Every stage before classification can
//! short-circuit with a terminal rejection; classification never rejects,
//! it only decides whether the stored review is held for moderation.
//!
//! Failure policy per stage:
//! - captcha: fail closed (transport error rejects the submission)
//! - rate limit, duplicate: fail open on store errors (handled inside
//!   their activities)
//! - persistence: terminal, generic user-facing message

use chrono::Utc;

use crate::common::pii::PiiVerdict;
use crate::common::profanity::ProfanityVerdict;
use crate::domains::reviews::activities::duplicates::check_duplicate;
use crate::domains::reviews::activities::rate_limit::check_rate_limit;
use crate::domains::reviews::models::{
    ClassifierVerdict, NewStoredReview, RejectReason, ReviewSubmission, SubmissionResult,
};
use crate::kernel::ModerationDeps;

/// Run a review submission through the moderation pipeline
///
/// Exactly one row is inserted when the pipeline reaches persistence;
/// rejections insert nothing. The author's identity pair scopes the rate
/// limit and duplicate checks. Two concurrent submissions from the same
/// author can race past both checks before either persists; that window
/// is accepted (worst case: one extra review briefly over the limit).
pub async fn submit_review(
    broker_id: &str,
    author_id: &str,
    submission: ReviewSubmission,
    deps: &ModerationDeps,
) -> SubmissionResult {
    // Caller contract, enforced here as well so the library stands alone
    if let Err(reason) = submission.validate() {
        return SubmissionResult::rejected(&reason);
    }

    // Bot defense, fail closed
    match deps.captcha.verify(&submission.captcha_token).await {
        Ok(true) => {}
        Ok(false) => {
            return SubmissionResult::rejected(&RejectReason::CaptchaFailed);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Captcha verifier errored, rejecting submission");
            return SubmissionResult::rejected(&RejectReason::CaptchaFailed);
        }
    }

    let rate = check_rate_limit(broker_id, author_id, deps).await;
    if !rate.within_limit {
        return SubmissionResult::rejected(&RejectReason::RateLimited {
            count: rate.count,
            limit: deps.rate_limit,
            window_hours: deps.rate_window.num_hours(),
        });
    }

    let duplicate =
        check_duplicate(broker_id, author_id, submission.fingerprint, deps).await;
    if duplicate.is_duplicate {
        // The similar review id stays server-side; the user-facing message
        // only confirms resemblance to their own history
        tracing::info!(
            broker_id,
            author_id,
            similar_review_id = ?duplicate.similar_review_id,
            "Rejecting near-duplicate submission"
        );
        return SubmissionResult::rejected(&RejectReason::Duplicate);
    }

    // Profanity cleaning first, PII redaction applied to its output
    let profanity = deps.profanity.classify(&submission.body);
    let pii = deps.pii.classify(&profanity.cleaned);
    let verdict = merge_verdicts(&profanity, &pii);
    let notes = admin_notes(&profanity, &pii);

    let now = Utc::now();
    let review = NewStoredReview {
        broker_id: broker_id.to_string(),
        author_id: author_id.to_string(),
        rating: submission.rating,
        body: if verdict.flag {
            verdict.cleaned_text.clone()
        } else {
            submission.body.clone()
        },
        flagged: verdict.flag,
        admin_notes: notes.clone(),
        published_at: if verdict.flag { None } else { Some(now) },
        created_at: now,
    };

    match deps.store.insert(review).await {
        Ok(review_id) => SubmissionResult::accepted(review_id, verdict.flag, notes),
        Err(e) => {
            tracing::error!(error = %e, broker_id, author_id, "Review insert failed");
            SubmissionResult::rejected(&RejectReason::Persistence)
        }
    }
}

/// Merge the two classifier outputs into one verdict
fn merge_verdicts(profanity: &ProfanityVerdict, pii: &PiiVerdict) -> ClassifierVerdict {
    let mut categories = Vec::new();
    if profanity.flagged {
        categories.push("profanity".to_string());
    }
    for label in &pii.categories {
        categories.push(format!("pii:{}", label));
    }

    ClassifierVerdict {
        flag: profanity.flagged || pii.flagged,
        categories,
        cleaned_text: pii.cleaned.clone(),
    }
}

/// Human-readable note for the moderation queue, e.g.
/// "Contains profanity; Contains PII: email, names"
fn admin_notes(profanity: &ProfanityVerdict, pii: &PiiVerdict) -> Option<String> {
    let mut parts = Vec::new();
    if profanity.flagged {
        parts.push("Contains profanity".to_string());
    }
    if pii.flagged {
        parts.push(format!("Contains PII: {}", pii.categories.join(", ")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}
