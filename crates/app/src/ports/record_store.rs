//! Record store port — single-field writes to entity tables.

use std::future::Future;

use rulehub_domain::error::RuleHubError;

/// Writes individual fields back to business-record tables.
///
/// This is the only way the engine mutates records; implementations must
/// reject table names outside the known entity tables, since identifiers
/// cannot be bound as query parameters.
pub trait RecordStore {
    /// Set `field` to `value` on the row with the given id.
    fn update_field(
        &self,
        table: &str,
        record_id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> impl Future<Output = Result<(), RuleHubError>> + Send;
}
