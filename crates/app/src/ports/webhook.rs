//! Webhook port — outbound HTTP delivery of rule events.

use std::collections::BTreeMap;
use std::future::Future;

use serde::{Deserialize, Serialize};

use rulehub_domain::entity::Entity;
use rulehub_domain::error::RuleHubError;
use rulehub_domain::event::ChangeKind;
use rulehub_domain::id::RuleId;
use rulehub_domain::rule::HttpMethod;

/// JSON body delivered to the configured endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    pub event: ChangeKind,
    pub entity: Entity,
    pub record: serde_json::Value,
    pub rule_id: RuleId,
}

/// A fully-resolved outbound webhook call.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub envelope: WebhookEnvelope,
}

/// Delivers webhook envelopes over HTTP.
pub trait WebhookClient {
    /// Deliver the request; any non-2xx response is an error.
    fn deliver(
        &self,
        request: WebhookRequest,
    ) -> impl Future<Output = Result<(), RuleHubError>> + Send;
}
