//! Reviews domain - submission moderation pipeline.

pub mod activities;
pub mod data;
pub mod models;

pub use activities::submit::submit_review;
pub use models::{ReviewSubmission, SubmissionResult};
