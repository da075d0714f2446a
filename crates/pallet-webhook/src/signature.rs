//! # Webhook Signature Verification
//!
//! Callers sign the raw request body with HMAC-SHA256 using the shared secret
//! and send the lowercase hex digest in the `X-Webhook-Signature` header.
//! The body is hashed exactly as received.

use crate::config::WebhookConfig;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

/// A webhook callback as received: raw body plus the signature header
#[derive(Debug, Clone, Copy)]
pub struct WebhookEnvelope<'a> {
    pub raw_body: &'a [u8],
    pub signature: Option<&'a str>,
}

impl<'a> WebhookEnvelope<'a> {
    pub fn new(raw_body: &'a [u8], signature: Option<&'a str>) -> Self {
        Self {
            raw_body,
            signature,
        }
    }

    /// Parse the body as JSON. Only call after the signature has been verified.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(self.raw_body)
    }
}

/// Verifies webhook signatures against an injected secret
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    config: WebhookConfig,
}

impl SignatureVerifier {
    pub fn new(config: WebhookConfig) -> Self {
        Self { config }
    }

    /// Check the signature on an envelope
    pub fn verify(&self, envelope: &WebhookEnvelope<'_>) -> bool {
        let valid = verify_signature(
            envelope.raw_body,
            envelope.signature.unwrap_or_default(),
            self.config.secret(),
        );

        if valid {
            debug!(body_length = envelope.raw_body.len(), "webhook_signature_valid");
        } else {
            warn!(
                has_signature = envelope.signature.is_some_and(|s| !s.is_empty()),
                signature_length = envelope.signature.map(str::len).unwrap_or(0),
                body_length = envelope.raw_body.len(),
                "webhook_signature_invalid"
            );
        }

        valid
    }

    /// Sign a body with the configured secret
    pub fn sign(&self, raw_body: &[u8]) -> String {
        compute_signature(raw_body, self.config.secret())
    }
}

/// Verify a hex HMAC-SHA256 signature over `raw_body`.
///
/// An empty signature fails without hashing anything.
pub fn verify_signature(raw_body: &[u8], provided_signature: &str, secret: &str) -> bool {
    if provided_signature.is_empty() {
        return false;
    }

    let expected = compute_signature(raw_body, secret);
    constant_time_compare(&expected, provided_signature)
}

/// Lowercase hex HMAC-SHA256 of `raw_body` keyed by `secret`
pub fn compute_signature(raw_body: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(raw_body);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
