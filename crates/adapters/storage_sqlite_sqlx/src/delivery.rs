//! `SQLite` implementations of the delivery sinks.
//!
//! Emails go to an outbox table drained by an external sender; in-app
//! notifications and tasks are plain inserts.

use sqlx::SqlitePool;

use rulehub_app::ports::{EmailJob, EmailQueue, Notification, NotificationSink, TaskRow, TaskSink};
use rulehub_domain::error::RuleHubError;
use rulehub_domain::time;

use crate::error::StorageError;

/// `SQLite`-backed email outbox.
pub struct SqliteEmailQueue {
    pool: SqlitePool,
}

impl SqliteEmailQueue {
    /// Create a new queue backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EmailQueue for SqliteEmailQueue {
    async fn enqueue(&self, job: EmailJob) -> Result<(), RuleHubError> {
        sqlx::query(
            "INSERT INTO email_queue (recipient, subject, body, queued_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&job.to)
        .bind(&job.subject)
        .bind(&job.body)
        .bind(time::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(())
    }
}

/// `SQLite`-backed in-app notification sink.
pub struct SqliteNotificationSink {
    pool: SqlitePool,
}

impl SqliteNotificationSink {
    /// Create a new sink backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl NotificationSink for SqliteNotificationSink {
    async fn insert(&self, notification: Notification) -> Result<(), RuleHubError> {
        sqlx::query(
            "INSERT INTO notifications (user_id, title, message, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(notification.user_id.as_uuid())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(time::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(())
    }
}

/// `SQLite`-backed task sink.
pub struct SqliteTaskSink {
    pool: SqlitePool,
}

impl SqliteTaskSink {
    /// Create a new sink backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl TaskSink for SqliteTaskSink {
    async fn insert(&self, task: TaskRow) -> Result<(), RuleHubError> {
        sqlx::query(
            "INSERT INTO tasks (title, description, assignee, due_date, record_id, record_type, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.assignee.map(|id| id.as_uuid()))
        .bind(task.due_date.map(|ts| ts.to_rfc3339()))
        .bind(&task.record_id)
        .bind(&task.record_type)
        .bind(time::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(())
    }
}
