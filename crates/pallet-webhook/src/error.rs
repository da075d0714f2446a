//! Webhook error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    /// The shared secret is unset or blank
    #[error("Configuration error: {0} not set")]
    MissingSecret(&'static str),
}

pub type WebhookResult<T> = Result<T, WebhookError>;
