//! Event bus port — publish/subscribe for engine notifications.

use std::future::Future;

use serde::{Deserialize, Serialize};

use rulehub_domain::error::RuleHubError;
use rulehub_domain::id::{EventId, RuleId};
use rulehub_domain::time::Timestamp;

/// Notification that a rule fired for a change event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTriggered {
    pub rule_id: RuleId,
    pub rule_name: String,
    /// The change event that made the rule fire.
    pub event_id: EventId,
    pub at: Timestamp,
}

/// Publishes engine notifications to interested subscribers.
pub trait EventPublisher {
    /// Publish a notification to all current subscribers.
    fn publish(
        &self,
        event: RuleTriggered,
    ) -> impl Future<Output = Result<(), RuleHubError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        event: RuleTriggered,
    ) -> impl Future<Output = Result<(), RuleHubError>> + Send {
        (**self).publish(event)
    }
}
