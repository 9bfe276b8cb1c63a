//! Execution log port — per-action audit trail.

use std::future::Future;

use serde::{Deserialize, Serialize};

use rulehub_domain::error::RuleHubError;
use rulehub_domain::id::RuleId;
use rulehub_domain::time::Timestamp;

/// Outcome of one action attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Succeeded,
    Failed,
}

/// One audit row: a single action attempt within a rule execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub rule_id: RuleId,
    /// Action tag, e.g. `"webhook"`.
    pub action_type: &'static str,
    pub status: ExecutionStatus,
    /// Failure description; `None` on success.
    pub error_message: Option<String>,
    /// The triggering record's id (may be empty).
    pub record_id: String,
    /// The triggering record's entity name, e.g. `"lead"`.
    pub record_type: String,
    pub executed_at: Timestamp,
}

/// Append-only store for [`ExecutionRecord`]s.
pub trait ExecutionLog {
    /// Persist an execution record.
    fn record(
        &self,
        entry: ExecutionRecord,
    ) -> impl Future<Output = Result<(), RuleHubError>> + Send;
}
