//! Delivery ports — email queue, notification, and task sinks.
//!
//! All three are insert-only: the engine enqueues work and never reads it
//! back. Delivery itself (SMTP, push, …) belongs to downstream consumers.

use std::future::Future;

use serde::{Deserialize, Serialize};

use rulehub_domain::error::RuleHubError;
use rulehub_domain::id::UserId;
use rulehub_domain::time::Timestamp;

/// A rendered email waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailJob {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Queue of outgoing emails.
pub trait EmailQueue {
    /// Append a job to the queue.
    fn enqueue(&self, job: EmailJob) -> impl Future<Output = Result<(), RuleHubError>> + Send;
}

/// An in-app notification addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub user_id: UserId,
    pub title: String,
    pub message: String,
}

/// Sink for in-app notifications.
pub trait NotificationSink {
    /// Insert a notification row.
    fn insert(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), RuleHubError>> + Send;
}

/// A task linked to the record that triggered its creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    pub title: String,
    pub description: String,
    pub assignee: Option<UserId>,
    pub due_date: Option<Timestamp>,
    pub record_id: String,
    pub record_type: String,
}

/// Sink for follow-up tasks.
pub trait TaskSink {
    /// Insert a task row.
    fn insert(&self, task: TaskRow) -> impl Future<Output = Result<(), RuleHubError>> + Send;
}
