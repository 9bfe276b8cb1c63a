//! # rulehub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the storage port traits defined in `rulehub-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `rulehub-app` (for port traits) and `rulehub-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod delivery;
pub mod directory;
pub mod error;
pub mod execution_log;
pub mod pool;
pub mod record_store;
pub mod rule_repo;

pub use delivery::{SqliteEmailQueue, SqliteNotificationSink, SqliteTaskSink};
pub use directory::SqlitePermissionDirectory;
pub use error::StorageError;
pub use execution_log::SqliteExecutionLog;
pub use pool::{Config, Database};
pub use record_store::SqliteRecordStore;
pub use rule_repo::SqliteRuleRepository;
