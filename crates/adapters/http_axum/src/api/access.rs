//! JSON handlers for access resolution.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use rulehub_app::ports::{
    EmailQueue, EventPublisher, ExecutionLog, NotificationSink, PermissionDirectory, RecordStore,
    RuleRepository, TaskSink, WebhookClient,
};
use rulehub_domain::access::{FieldAccess, UserAccess};
use rulehub_domain::entity::Module;

use crate::context;
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the resolve endpoint.
pub enum ResolveResponse {
    Ok(Json<UserAccess>),
}

impl IntoResponse for ResolveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the field-access endpoint.
pub enum FieldAccessResponse {
    Ok(Json<FieldAccess>),
}

impl IntoResponse for FieldAccessResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/access` — resolve the caller's permissions and roles.
pub async fn resolve<R, S, Q, N, T, W, L, P, D>(
    State(state): State<AppState<R, S, Q, N, T, W, L, P, D>>,
    headers: HeaderMap,
) -> Result<ResolveResponse, ApiError>
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
    let access = state.resolver.resolve(&ctx).await;
    Ok(ResolveResponse::Ok(Json(access)))
}

/// `GET /api/access/fields/:module` — the caller's field access for a module.
pub async fn field_access<R, S, Q, N, T, W, L, P, D>(
    State(state): State<AppState<R, S, Q, N, T, W, L, P, D>>,
    Path(module): Path<String>,
    headers: HeaderMap,
) -> Result<FieldAccessResponse, ApiError>
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
    let module = Module::from_str(&module)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let access = state.resolver.resolve(&ctx).await;
    Ok(FieldAccessResponse::Ok(Json(access.field_access(module))))
}
