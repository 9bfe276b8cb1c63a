//! JSON REST handlers for rules.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use rulehub_app::ports::{
    EmailQueue, EventPublisher, ExecutionLog, NotificationSink, PermissionDirectory, RecordStore,
    RuleRepository, TaskSink, WebhookClient,
};
use rulehub_domain::error::RuleHubError;
use rulehub_domain::id::RuleId;
use rulehub_domain::rule::{Action, Rule, Trigger};

use crate::context;
use crate::error::ApiError;
use crate::state::AppState;

/// Permission required to create, update, or delete rules.
pub const MANAGE_PERMISSION: &str = "automation.manage";

/// Request body for creating a rule.
#[derive(Deserialize)]
pub struct CreateRuleRequest {
    pub name: String,
    pub enabled: Option<bool>,
    pub priority: Option<i32>,
    pub trigger: Trigger,
    pub actions: Vec<Action>,
}

/// Request body for updating a rule.
#[derive(Deserialize)]
pub struct UpdateRuleRequest {
    pub name: String,
    pub enabled: bool,
    pub priority: i32,
    pub trigger: Trigger,
    pub actions: Vec<Action>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Rule>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Rule>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Rule>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_id(id: &str) -> Result<RuleId, ApiError> {
    RuleId::from_str(id).map_err(|_| ApiError::BadRequest(format!("invalid rule id: {id}")))
}

/// `GET /api/rules` — list all rules.
pub async fn list<R, S, Q, N, T, W, L, P, D>(
    State(state): State<AppState<R, S, Q, N, T, W, L, P, D>>,
) -> Result<ListResponse, ApiError>
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
    let rules = state.rule_service.list_rules().await?;
    Ok(ListResponse::Ok(Json(rules)))
}

/// `GET /api/rules/:id` — get rule by ID.
pub async fn get<R, S, Q, N, T, W, L, P, D>(
    State(state): State<AppState<R, S, Q, N, T, W, L, P, D>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
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
    let rule_id = parse_id(&id)?;
    let rule = state.rule_service.get_rule(rule_id).await?;
    Ok(GetResponse::Ok(Json(rule)))
}

/// `POST /api/rules` — create a new rule.
///
/// Requires the [`MANAGE_PERMISSION`] permission.
pub async fn create<R, S, Q, N, T, W, L, P, D>(
    State(state): State<AppState<R, S, Q, N, T, W, L, P, D>>,
    headers: HeaderMap,
    Json(req): Json<CreateRuleRequest>,
) -> Result<CreateResponse, ApiError>
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
    access
        .require_permission(MANAGE_PERMISSION)
        .map_err(RuleHubError::from)?;

    let mut builder = Rule::builder().name(req.name).trigger(req.trigger);
    if let Some(enabled) = req.enabled {
        builder = builder.enabled(enabled);
    }
    if let Some(priority) = req.priority {
        builder = builder.priority(priority);
    }
    for action in req.actions {
        builder = builder.action(action);
    }

    let rule = builder.build()?;
    let created = state.rule_service.create_rule(rule).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/rules/:id` — update an existing rule.
///
/// Requires the [`MANAGE_PERMISSION`] permission.
pub async fn update<R, S, Q, N, T, W, L, P, D>(
    State(state): State<AppState<R, S, Q, N, T, W, L, P, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateRuleRequest>,
) -> Result<GetResponse, ApiError>
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
    access
        .require_permission(MANAGE_PERMISSION)
        .map_err(RuleHubError::from)?;

    let rule_id = parse_id(&id)?;

    // Verify it exists
    state.rule_service.get_rule(rule_id).await?;

    let mut builder = Rule::builder()
        .id(rule_id)
        .name(req.name)
        .enabled(req.enabled)
        .priority(req.priority)
        .trigger(req.trigger);
    for action in req.actions {
        builder = builder.action(action);
    }

    let rule = builder.build()?;
    let updated = state.rule_service.update_rule(rule).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/rules/:id` — delete a rule.
///
/// Requires the [`MANAGE_PERMISSION`] permission.
pub async fn delete<R, S, Q, N, T, W, L, P, D>(
    State(state): State<AppState<R, S, Q, N, T, W, L, P, D>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<DeleteResponse, ApiError>
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
    access
        .require_permission(MANAGE_PERMISSION)
        .map_err(RuleHubError::from)?;

    let rule_id = parse_id(&id)?;
    state.rule_service.delete_rule(rule_id).await?;
    Ok(DeleteResponse::NoContent)
}
