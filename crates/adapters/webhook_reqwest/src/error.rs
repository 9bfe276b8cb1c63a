//! Webhook-specific error type wrapping reqwest errors.

use rulehub_domain::error::RuleHubError;

/// Errors originating from webhook delivery.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The request could not be built or sent.
    #[error("webhook request failed")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("webhook endpoint returned status {0}")]
    BadStatus(u16),
}

impl From<WebhookError> for RuleHubError {
    fn from(err: WebhookError) -> Self {
        Self::Storage(Box::new(err))
    }
}
