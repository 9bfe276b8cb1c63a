//! # rulehubd — rulehub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (TOML file + env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct adapter implementations of the ports
//! - Construct the rule engine, rule service, and access resolver
//! - Build the axum router and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use tracing_subscriber::EnvFilter;

use rulehub_adapter_http_axum::state::AppState;
use rulehub_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteEmailQueue, SqliteExecutionLog, SqliteNotificationSink,
    SqlitePermissionDirectory, SqliteRecordStore, SqliteRuleRepository, SqliteTaskSink,
};
use rulehub_app::engine::RuleEngine;
use rulehub_app::event_bus::InProcessEventBus;
use rulehub_app::resolver::AccessResolver;
use rulehub_app::services::rule_service::RuleService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = DbConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Event bus
    let event_bus = InProcessEventBus::new(256);

    // Engine over the storage and webhook adapters
    let webhook_client = rulehub_adapter_webhook_reqwest::Config {
        timeout_secs: config.webhook.timeout_secs,
    }
    .build()?;
    let engine = RuleEngine::new(
        SqliteRuleRepository::new(pool.clone()),
        SqliteRecordStore::new(pool.clone()),
        SqliteEmailQueue::new(pool.clone()),
        SqliteNotificationSink::new(pool.clone()),
        SqliteTaskSink::new(pool.clone()),
        webhook_client,
        SqliteExecutionLog::new(pool.clone()),
        event_bus,
    );

    // Services
    let rule_service = RuleService::new(SqliteRuleRepository::new(pool.clone()));
    let resolver = AccessResolver::new(
        SqlitePermissionDirectory::new(pool),
        config.access.environment,
        config.access.dev_bypass,
    );

    // HTTP
    let state = AppState::new(rule_service, engine, resolver);
    let app = rulehub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    tracing::info!(addr = %bind_addr, "rulehubd listening");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
