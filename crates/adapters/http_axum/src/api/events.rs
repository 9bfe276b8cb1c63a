//! JSON handler for change-event intake.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use rulehub_app::ports::{
    EmailQueue, EventPublisher, ExecutionLog, NotificationSink, PermissionDirectory, RecordStore,
    RuleRepository, TaskSink, WebhookClient,
};
use rulehub_domain::entity::Entity;
use rulehub_domain::event::{ChangeEvent, ChangeKind};
use rulehub_domain::id::{EventId, RuleId};

use crate::context;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body reporting a record change.
#[derive(Deserialize)]
pub struct IngestEventRequest {
    pub event: ChangeKind,
    pub entity: Entity,
    /// Snapshot of the changed record, including its `id`.
    pub record: serde_json::Value,
}

/// Result of running the engine over one change event.
#[derive(Serialize)]
pub struct IngestEventResponse {
    pub event_id: EventId,
    /// Ids of the rules that fired, in execution order.
    pub fired: Vec<RuleId>,
    pub count: usize,
}

/// Possible responses from the intake endpoint.
pub enum IngestResponse {
    Ok(Json<IngestEventResponse>),
}

impl IntoResponse for IngestResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/events` — report a record change and run matching rules.
pub async fn ingest<R, S, Q, N, T, W, L, P, D>(
    State(state): State<AppState<R, S, Q, N, T, W, L, P, D>>,
    headers: HeaderMap,
    Json(req): Json<IngestEventRequest>,
) -> Result<IngestResponse, ApiError>
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
    let ctx = context::from_headers(&headers)?;
    let event = ChangeEvent::new(req.event, req.entity, req.record, ctx.tenant_id);
    let event_id = event.id;

    let fired = state.engine.process_event(&event).await?;
    let count = fired.len();

    Ok(IngestResponse::Ok(Json(IngestEventResponse {
        event_id,
        fired,
        count,
    })))
}
