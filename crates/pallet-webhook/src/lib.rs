//! # pallet-webhook
//!
//! Authentication for signed webhook callbacks.
//!
//! Senders compute `hex(HMAC-SHA256(secret, raw_body))` and pass it in the
//! `X-Webhook-Signature` header. Verification never errors; it answers
//! `true` or `false` and leaves the response to the caller.
//!
//! ```rust
//! use pallet_webhook::{SignatureVerifier, WebhookConfig, WebhookEnvelope};
//!
//! let verifier = SignatureVerifier::new(WebhookConfig::new("shared-secret"));
//! let body = br#"{"num_pallets":1}"#;
//! let signature = verifier.sign(body);
//!
//! assert!(verifier.verify(&WebhookEnvelope::new(body, Some(&signature))));
//! ```

pub mod config;
pub mod error;
pub mod signature;

// Re-exports
pub use config::{WebhookConfig, SIGNATURE_HEADER, WEBHOOK_SECRET_VAR};
pub use error::{WebhookError, WebhookResult};
pub use signature::{compute_signature, verify_signature, SignatureVerifier, WebhookEnvelope};
