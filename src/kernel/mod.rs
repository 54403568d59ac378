//! Kernel module - pipeline infrastructure and dependencies.

pub mod captcha;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use captcha::{create_captcha_verifier, DisabledCaptchaVerifier, HttpCaptchaVerifier};
pub use deps::ModerationDeps;
pub use test_dependencies::{InMemoryReviewStore, MockCaptchaVerifier};
pub use traits::*;
