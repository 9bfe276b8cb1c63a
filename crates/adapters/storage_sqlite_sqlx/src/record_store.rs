//! `SQLite` implementation of [`RecordStore`].
//!
//! Entity records keep their fields in a JSON `data` column, so a field
//! update is a `json_set` on that document. The table name is checked
//! against the known entity tables before it is spliced into the query;
//! everything else is bound.

use sqlx::SqlitePool;

use rulehub_app::ports::RecordStore;
use rulehub_domain::entity::Entity;
use rulehub_domain::error::RuleHubError;

use crate::error::StorageError;

/// `SQLite`-backed entity record store.
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Create a new record store backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn known_table(table: &str) -> Result<&'static str, StorageError> {
    Entity::ALL
        .into_iter()
        .map(Entity::table)
        .find(|known| *known == table)
        .ok_or_else(|| StorageError::UnknownTable(table.to_string()))
}

impl RecordStore for SqliteRecordStore {
    async fn update_field(
        &self,
        table: &str,
        record_id: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Result<(), RuleHubError> {
        let table = known_table(table)?;
        let value_json = serde_json::to_string(&value).map_err(StorageError::from)?;

        let query = format!("UPDATE {table} SET data = json_set(data, '$.' || ?, json(?)) WHERE id = ?");
        sqlx::query(&query)
            .bind(field)
            .bind(&value_json)
            .bind(record_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
