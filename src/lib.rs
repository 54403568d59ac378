// Broker Review Moderation - Pipeline Core
//
// This crate decides the disposition of user-submitted broker reviews:
// accepted, silently cleaned, flagged for manual moderation, or rejected.
// It combines captcha verification, per-author rate limiting, near-duplicate
// detection, and content-safety filtering (profanity + PII) into one ordered
// pipeline with explicit short-circuit and fallback semantics.
//
// Invoked as a library from the surrounding web application; owns no HTTP
// surface of its own.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
