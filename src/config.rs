use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Moderation pipeline configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// Shared secret for the captcha verification service.
    /// Absent means captcha verification is disabled (non-production only).
    pub captcha_secret: Option<String>,
    pub captcha_verify_url: String,
    /// Max reviews per (broker, author) inside the sliding window
    pub rate_limit: i64,
    /// Sliding rate-limit window, in hours
    pub rate_window_hours: i64,
    /// Fingerprint similarity at or above this is a near-duplicate
    pub duplicate_threshold: f64,
    pub database_url: Option<String>,
}

pub const DEFAULT_CAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";
pub const DEFAULT_RATE_LIMIT: i64 = 3;
pub const DEFAULT_RATE_WINDOW_HOURS: i64 = 24;
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.8;

impl ModerationConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            captcha_secret: env::var("CAPTCHA_SECRET_KEY").ok(),
            captcha_verify_url: env::var("CAPTCHA_VERIFY_URL")
                .unwrap_or_else(|_| DEFAULT_CAPTCHA_VERIFY_URL.to_string()),
            rate_limit: env::var("REVIEW_RATE_LIMIT")
                .unwrap_or_else(|_| DEFAULT_RATE_LIMIT.to_string())
                .parse()
                .context("REVIEW_RATE_LIMIT must be a valid number")?,
            rate_window_hours: env::var("REVIEW_RATE_WINDOW_HOURS")
                .unwrap_or_else(|_| DEFAULT_RATE_WINDOW_HOURS.to_string())
                .parse()
                .context("REVIEW_RATE_WINDOW_HOURS must be a valid number")?,
            duplicate_threshold: env::var("REVIEW_DUPLICATE_THRESHOLD")
                .unwrap_or_else(|_| DEFAULT_DUPLICATE_THRESHOLD.to_string())
                .parse()
                .context("REVIEW_DUPLICATE_THRESHOLD must be a valid number")?,
            database_url: env::var("DATABASE_URL").ok(),
        })
    }
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            captcha_secret: None,
            captcha_verify_url: DEFAULT_CAPTCHA_VERIFY_URL.to_string(),
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_window_hours: DEFAULT_RATE_WINDOW_HOURS,
            duplicate_threshold: DEFAULT_DUPLICATE_THRESHOLD,
            database_url: None,
        }
    }
}
