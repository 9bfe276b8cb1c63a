//! # rulehub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RuleRepository` — CRUD and matching queries for rules
//!   - `RecordStore` — single-field writes to entity tables
//!   - `EmailQueue`, `NotificationSink`, `TaskSink` — side-effect sinks
//!   - `WebhookClient` — outbound HTTP delivery
//!   - `ExecutionLog` — per-action audit trail
//!   - `PermissionDirectory` — remote permission/role lookups
//! - Provide the **rule engine**: evaluate triggers, run actions best-effort
//! - Provide the **access resolver**: per-request permission resolution with
//!   the development-only bypass
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `rulehub-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod engine;
pub mod event_bus;
pub mod ports;
pub mod resolver;
pub mod services;
