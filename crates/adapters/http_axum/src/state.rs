//! Shared application state for axum handlers.

use std::sync::Arc;

use rulehub_app::engine::RuleEngine;
use rulehub_app::ports::{
    EmailQueue, EventPublisher, ExecutionLog, NotificationSink, PermissionDirectory, RecordStore,
    RuleRepository, TaskSink, WebhookClient,
};
use rulehub_app::resolver::AccessResolver;
use rulehub_app::services::rule_service::RuleService;

/// Application state shared across all axum handlers.
///
/// Generic over the port implementations to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do
/// not need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<R, S, Q, N, T, W, L, P, D> {
    /// Rule CRUD service.
    pub rule_service: Arc<RuleService<R>>,
    /// Rule engine processing incoming change events.
    pub engine: Arc<RuleEngine<R, S, Q, N, T, W, L, P>>,
    /// Access resolver for permission and role lookups.
    pub resolver: Arc<AccessResolver<D>>,
}

impl<R, S, Q, N, T, W, L, P, D> Clone for AppState<R, S, Q, N, T, W, L, P, D> {
    fn clone(&self) -> Self {
        Self {
            rule_service: Arc::clone(&self.rule_service),
            engine: Arc::clone(&self.engine),
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<R, S, Q, N, T, W, L, P, D> AppState<R, S, Q, N, T, W, L, P, D>
where
    R: RuleRepository + Send + Sync + 'static,
    S: RecordStore + Send + Sync + 'static,
    Q: EmailQueue + Send + Sync + 'static,
    N: NotificationSink + Send + Sync + 'static,
    T: TaskSink + Send + Sync + 'static,
    W: WebhookClient + Send + Sync + 'static,
    L: ExecutionLog + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
    D: PermissionDirectory + Send + Sync + 'static,
{
    /// Create a new application state from the service instances.
    pub fn new(
        rule_service: RuleService<R>,
        engine: RuleEngine<R, S, Q, N, T, W, L, P>,
        resolver: AccessResolver<D>,
    ) -> Self {
        Self {
            rule_service: Arc::new(rule_service),
            engine: Arc::new(engine),
            resolver: Arc::new(resolver),
        }
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when services need to be shared with background tasks
    /// before constructing the HTTP state.
    pub fn from_arcs(
        rule_service: Arc<RuleService<R>>,
        engine: Arc<RuleEngine<R, S, Q, N, T, W, L, P>>,
        resolver: Arc<AccessResolver<D>>,
    ) -> Self {
        Self {
            rule_service,
            engine,
            resolver,
        }
    }
}
