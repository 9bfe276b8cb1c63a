//! `SQLite` implementation of [`ExecutionLog`].

use sqlx::SqlitePool;

use rulehub_app::ports::{ExecutionLog, ExecutionRecord, ExecutionStatus};
use rulehub_domain::error::RuleHubError;

use crate::error::StorageError;

/// `SQLite`-backed append-only execution log.
pub struct SqliteExecutionLog {
    pool: SqlitePool,
}

impl SqliteExecutionLog {
    /// Create a new log backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn status_str(status: ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::Succeeded => "succeeded",
        ExecutionStatus::Failed => "failed",
    }
}

impl ExecutionLog for SqliteExecutionLog {
    async fn record(&self, entry: ExecutionRecord) -> Result<(), RuleHubError> {
        sqlx::query(
            "INSERT INTO execution_log (rule_id, action_type, status, error_message, record_id, record_type, executed_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.rule_id.as_uuid())
        .bind(entry.action_type)
        .bind(status_str(entry.status))
        .bind(&entry.error_message)
        .bind(&entry.record_id)
        .bind(&entry.record_type)
        .bind(entry.executed_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(())
    }
}
