// Captcha Verifier Implementations

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::ModerationConfig;
use crate::kernel::traits::BaseCaptchaVerifier;

/// Bounded timeout for the one third-party call in the pipeline
const VERIFY_TIMEOUT: Duration = Duration::from_secs(8);

// =============================================================================
// HTTP Captcha Verifier
// =============================================================================

#[derive(Debug, Deserialize)]
struct CaptchaVerifyResponse {
    success: bool,
}

/// Server-to-server captcha verification against the provider endpoint
///
/// Fails closed: any transport or deserialization error reports the token
/// as unverified. Bot abuse is considered worse than losing one
/// legitimate submission.
pub struct HttpCaptchaVerifier {
    verify_url: String,
    secret: String,
    client: Client,
}

impl HttpCaptchaVerifier {
    pub fn new(verify_url: String, secret: String) -> Self {
        let client = Client::builder()
            .timeout(VERIFY_TIMEOUT)
            .build()
            .expect("HTTP client should build with default TLS backend");

        Self {
            verify_url,
            secret,
            client,
        }
    }
}

#[async_trait]
impl BaseCaptchaVerifier for HttpCaptchaVerifier {
    async fn verify(&self, token: &str) -> Result<bool> {
        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("secret", self.secret.as_str());
        form_body.insert("response", token);

        let res = self
            .client
            .post(&self.verify_url)
            .form(&form_body)
            .send()
            .await;

        match res {
            Ok(response) => match response.json::<CaptchaVerifyResponse>().await {
                Ok(payload) => Ok(payload.success),
                Err(e) => {
                    tracing::warn!(error = %e, "Captcha response did not parse, treating token as unverified");
                    Ok(false)
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Captcha verification request failed, treating token as unverified");
                Ok(false)
            }
        }
    }
}

// =============================================================================
// Disabled Verifier (no secret configured)
// =============================================================================

/// Pass-through verifier for environments without a captcha secret
///
/// This is an explicit "disabled in this environment" policy for local
/// development and tests; production configuration must set the secret.
pub struct DisabledCaptchaVerifier;

#[async_trait]
impl BaseCaptchaVerifier for DisabledCaptchaVerifier {
    async fn verify(&self, _token: &str) -> Result<bool> {
        Ok(true)
    }
}

// =============================================================================
// Factory function
// =============================================================================

/// Create a captcha verifier based on configuration
pub fn create_captcha_verifier(config: &ModerationConfig) -> Arc<dyn BaseCaptchaVerifier> {
    match &config.captcha_secret {
        Some(secret) => {
            tracing::info!("Captcha verification enabled");
            Arc::new(HttpCaptchaVerifier::new(
                config.captcha_verify_url.clone(),
                secret.clone(),
            ))
        }
        None => {
            tracing::info!("No captcha secret configured, verification disabled");
            Arc::new(DisabledCaptchaVerifier)
        }
    }
}
