//! # rulehub-adapter-webhook-reqwest
//!
//! Outbound webhook delivery over HTTP using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `WebhookClient` port defined in `rulehub-app`
//! - Serialize the webhook envelope as a JSON request body
//! - Apply custom headers and the configured request timeout
//! - Treat any non-2xx response status as a delivery failure
//!
//! ## Dependency rule
//! Depends on `rulehub-app` (for the port trait) and `rulehub-domain`
//! (for domain types). The `app` and `domain` crates must never reference
//! this adapter.

pub mod error;

use std::time::Duration;

use rulehub_app::ports::{WebhookClient, WebhookRequest};
use rulehub_domain::error::RuleHubError;
use rulehub_domain::rule::HttpMethod;

pub use error::WebhookError;

/// Configuration for the webhook delivery client.
pub struct Config {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl Config {
    /// Build a [`ReqwestWebhookClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<ReqwestWebhookClient, WebhookError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;
        Ok(ReqwestWebhookClient { client })
    }
}

fn request_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
    }
}

/// HTTP webhook client backed by a shared [`reqwest::Client`].
#[derive(Clone)]
pub struct ReqwestWebhookClient {
    client: reqwest::Client,
}

impl WebhookClient for ReqwestWebhookClient {
    #[tracing::instrument(skip(self, request), fields(url = %request.url, rule_id = %request.envelope.rule_id))]
    async fn deliver(&self, request: WebhookRequest) -> Result<(), RuleHubError> {
        let mut builder = self
            .client
            .request(request_method(request.method), &request.url)
            .json(&request.envelope);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(WebhookError::from)?;
        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::BadStatus(status.as_u16()).into());
        }

        tracing::debug!(status = status.as_u16(), "webhook delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_configured_methods_to_http_methods() {
        assert_eq!(request_method(HttpMethod::Post), reqwest::Method::POST);
        assert_eq!(request_method(HttpMethod::Put), reqwest::Method::PUT);
        assert_eq!(request_method(HttpMethod::Patch), reqwest::Method::PATCH);
    }

    #[test]
    fn should_build_client_from_default_config() {
        assert!(Config::default().build().is_ok());
    }

    #[tokio::test]
    async fn should_fail_delivery_when_host_cannot_be_resolved() {
        let client = Config::default().build().unwrap();
        let request = WebhookRequest {
            url: "http://invalid.invalid/hook".to_string(),
            method: HttpMethod::Post,
            headers: std::collections::BTreeMap::new(),
            envelope: rulehub_app::ports::WebhookEnvelope {
                event: rulehub_domain::event::ChangeKind::Created,
                entity: rulehub_domain::entity::Entity::Lead,
                record: serde_json::json!({"id": "r1"}),
                rule_id: rulehub_domain::id::RuleId::new(),
            },
        };
        assert!(client.deliver(request).await.is_err());
    }
}
