//! Common module - pure text utilities shared across the pipeline.

pub mod fingerprint;
pub mod pii;
pub mod profanity;
