//! Change event — an immutable record-changed notification.
//!
//! Events are produced by the calling subsystem whenever a business record
//! is created, updated, or deleted. The rule engine consumes them
//! synchronously; it never generates events of its own except the
//! `rule_triggered` notifications published on the in-process bus.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::id::{EventId, TenantId};
use crate::record;
use crate::time::Timestamp;

/// What happened to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
    StatusChanged,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::StatusChanged => "status_changed",
        };
        f.write_str(name)
    }
}

/// A record-changed notification fed to the rule engine.
///
/// The `record` is an arbitrary JSON object owned by the caller. The engine
/// only reads it; writes go through the `RecordStore` port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub id: EventId,
    pub kind: ChangeKind,
    pub entity: Entity,
    pub record: serde_json::Value,
    pub tenant_id: TenantId,
    pub occurred_at: Timestamp,
}

impl ChangeEvent {
    /// Create an event occurring now.
    #[must_use]
    pub fn new(
        kind: ChangeKind,
        entity: Entity,
        record: serde_json::Value,
        tenant_id: TenantId,
    ) -> Self {
        Self {
            id: EventId::new(),
            kind,
            entity,
            record,
            tenant_id,
            occurred_at: crate::time::now(),
        }
    }

    /// The record's top-level `id` as a string, or empty when absent.
    ///
    /// Execution log rows are written either way, so a missing id degrades
    /// to an empty string rather than an error.
    #[must_use]
    pub fn record_id(&self) -> String {
        record::coerce_string(self.record.get("id")).unwrap_or_default()
    }
}
