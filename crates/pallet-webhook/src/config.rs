//! # Webhook Configuration
//!
//! The shared signing secret is loaded from the environment once at startup
//! and handed to the verifier. It is never mutated afterwards.

use crate::error::{WebhookError, WebhookResult};
use std::env;
use std::fmt;

/// Environment variable holding the shared secret
pub const WEBHOOK_SECRET_VAR: &str = "WEBHOOK_SECRET";

/// Header carrying the hex HMAC-SHA256 of the raw body
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Webhook verification configuration
#[derive(Clone)]
pub struct WebhookConfig {
    secret: String,
}

impl WebhookConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `WEBHOOK_SECRET`
    pub fn from_env() -> WebhookResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_secret(env::var(WEBHOOK_SECRET_VAR).ok())
    }

    /// Validate an optional secret; blank counts as unset
    pub fn from_secret(secret: Option<String>) -> WebhookResult<Self> {
        match secret {
            Some(secret) if !secret.trim().is_empty() => Ok(Self { secret }),
            _ => Err(WebhookError::MissingSecret(WEBHOOK_SECRET_VAR)),
        }
    }

    /// Create config with an explicit secret (for testing)
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_rejected() {
        assert!(matches!(
            WebhookConfig::from_secret(None),
            Err(WebhookError::MissingSecret(WEBHOOK_SECRET_VAR))
        ));
        assert!(WebhookConfig::from_secret(Some(String::new())).is_err());
        assert!(WebhookConfig::from_secret(Some("   ".to_string())).is_err());
    }

    #[test]
    fn test_secret_kept_verbatim() {
        let config = WebhookConfig::from_secret(Some(" s3cret ".to_string())).unwrap();
        assert_eq!(config.secret(), " s3cret ");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = WebhookConfig::new("top-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("redacted"));
    }
}
