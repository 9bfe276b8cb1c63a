//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the use-case layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod delivery;
pub mod directory;
pub mod event_bus;
pub mod execution_log;
pub mod record_store;
pub mod rule_repo;
pub mod webhook;

pub use delivery::{EmailJob, EmailQueue, Notification, NotificationSink, TaskRow, TaskSink};
pub use directory::PermissionDirectory;
pub use event_bus::EventPublisher;
pub use execution_log::{ExecutionLog, ExecutionRecord, ExecutionStatus};
pub use record_store::RecordStore;
pub use rule_repo::RuleRepository;
pub use webhook::{WebhookClient, WebhookEnvelope, WebhookRequest};
