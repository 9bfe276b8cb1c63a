//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod access;
#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod rules;

use axum::Router;
use axum::routing::{get, post};

use rulehub_app::ports::{
    EmailQueue, EventPublisher, ExecutionLog, NotificationSink, PermissionDirectory, RecordStore,
    RuleRepository, TaskSink, WebhookClient,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<R, S, Q, N, T, W, L, P, D>() -> Router<AppState<R, S, Q, N, T, W, L, P, D>>
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
    Router::new()
        // Rules
        .route(
            "/rules",
            get(rules::list::<R, S, Q, N, T, W, L, P, D>)
                .post(rules::create::<R, S, Q, N, T, W, L, P, D>),
        )
        .route(
            "/rules/{id}",
            get(rules::get::<R, S, Q, N, T, W, L, P, D>)
                .put(rules::update::<R, S, Q, N, T, W, L, P, D>)
                .delete(rules::delete::<R, S, Q, N, T, W, L, P, D>),
        )
        // Change-event intake
        .route("/events", post(events::ingest::<R, S, Q, N, T, W, L, P, D>))
        // Access resolution
        .route("/access", get(access::resolve::<R, S, Q, N, T, W, L, P, D>))
        .route(
            "/access/fields/{module}",
            get(access::field_access::<R, S, Q, N, T, W, L, P, D>),
        )
}
