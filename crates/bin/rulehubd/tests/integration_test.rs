//! End-to-end smoke tests for the full rulehubd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! adapters, real services, real axum router) and exercises the HTTP layer
//! via `tower::ServiceExt::oneshot` — no TCP port is bound and no outbound
//! HTTP is attempted.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use rulehub_adapter_http_axum::router;
use rulehub_adapter_http_axum::state::AppState;
use rulehub_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteEmailQueue, SqliteExecutionLog, SqliteNotificationSink,
    SqlitePermissionDirectory, SqliteRecordStore, SqliteRuleRepository, SqliteTaskSink,
};
use rulehub_app::engine::RuleEngine;
use rulehub_app::event_bus::InProcessEventBus;
use rulehub_app::resolver::AccessResolver;
use rulehub_app::services::rule_service::RuleService;
use rulehub_domain::access::Environment;
use rulehub_domain::id::{TenantId, UserId};

struct TestApp {
    app: axum::Router,
    pool: SqlitePool,
    user_id: UserId,
    tenant_id: TenantId,
}

impl TestApp {
    /// Attach the identity headers to a request builder.
    fn identified(&self, builder: axum::http::request::Builder) -> axum::http::request::Builder {
        builder
            .header("x-user-id", self.user_id.to_string())
            .header("x-tenant-id", self.tenant_id.to_string())
    }

    async fn grant(&self, permission: &str) {
        sqlx::query(
            "INSERT INTO user_permissions (user_id, tenant_id, permission) VALUES (?, ?, ?)",
        )
        .bind(self.user_id.as_uuid())
        .bind(self.tenant_id.as_uuid())
        .bind(permission)
        .execute(&self.pool)
        .await
        .unwrap();
    }
}

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> TestApp {
    let db = DbConfig {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");
    let pool = db.pool().clone();

    let webhook_client = rulehub_adapter_webhook_reqwest::Config::default()
        .build()
        .unwrap();
    let engine = RuleEngine::new(
        SqliteRuleRepository::new(pool.clone()),
        SqliteRecordStore::new(pool.clone()),
        SqliteEmailQueue::new(pool.clone()),
        SqliteNotificationSink::new(pool.clone()),
        SqliteTaskSink::new(pool.clone()),
        webhook_client,
        SqliteExecutionLog::new(pool.clone()),
        InProcessEventBus::new(256),
    );
    let state = AppState::new(
        RuleService::new(SqliteRuleRepository::new(pool.clone())),
        engine,
        AccessResolver::new(
            SqlitePermissionDirectory::new(pool.clone()),
            Environment::Production,
            false,
        ),
    );

    TestApp {
        app: router::build(state),
        pool,
        user_id: UserId::new(),
        tenant_id: TenantId::new(),
    }
}

fn rule_body() -> String {
    serde_json::json!({
        "name": "Close stale leads",
        "trigger": {
            "event": "updated",
            "entity": "lead",
            "conditions": [
                {"field": "status", "operator": "equals", "value": "stale"}
            ]
        },
        "actions": [
            {"type": "change_status", "status": "closed"}
        ]
    })
    .to_string()
}

async fn json_body(resp: axum::http::Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&resp.into_body().collect().await.unwrap().to_bytes()).unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let t = app().await;
    let resp = t
        .app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Rule CRUD with permission checks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_reject_rule_creation_without_manage_permission() {
    let t = app().await;

    let resp = t
        .app
        .clone()
        .oneshot(
            t.identified(Request::builder().method("POST").uri("/api/rules"))
                .header("content-type", "application/json")
                .body(Body::from(rule_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_complete_rule_crud_cycle() {
    let t = app().await;
    t.grant("automation.manage").await;

    // Create
    let resp = t
        .app
        .clone()
        .oneshot(
            t.identified(Request::builder().method("POST").uri("/api/rules"))
                .header("content-type", "application/json")
                .body(Body::from(rule_body()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    let rule_id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["module"], "crm");
    assert_eq!(body["priority"], 100);

    // List
    let resp = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/rules")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Get
    let resp = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/rules/{rule_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Update
    let update = serde_json::json!({
        "name": "Close stale leads (v2)",
        "enabled": false,
        "priority": 5,
        "trigger": {"event": "updated", "entity": "lead", "conditions": []},
        "actions": [{"type": "change_status", "status": "archived"}]
    });
    let resp = t
        .app
        .clone()
        .oneshot(
            t.identified(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/rules/{rule_id}")),
            )
            .header("content-type", "application/json")
            .body(Body::from(update.to_string()))
            .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["name"], "Close stale leads (v2)");
    assert_eq!(body["enabled"], false);

    // Delete
    let resp = t
        .app
        .clone()
        .oneshot(
            t.identified(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/rules/{rule_id}")),
            )
            .body(Body::empty())
            .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Verify gone
    let resp = t
        .app
        .oneshot(
            Request::builder()
                .uri(format!("/api/rules/{rule_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_invalid_rule_config() {
    let t = app().await;
    t.grant("automation.manage").await;

    let body = serde_json::json!({
        "name": "Bad webhook",
        "trigger": {"event": "created", "entity": "lead"},
        "actions": [{"type": "webhook", "url": "ftp://example.com"}]
    });
    let req = t
        .identified(Request::builder().method("POST").uri("/api/rules"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = t.app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Change-event intake runs the engine end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_run_matching_rule_on_event_intake() {
    let t = app().await;
    t.grant("automation.manage").await;

    // Seed a lead record
    sqlx::query("INSERT INTO crm_leads (id, tenant_id, data) VALUES (?, ?, ?)")
        .bind("r1")
        .bind(t.tenant_id.to_string())
        .bind(r#"{"status": "stale", "name": "Ana"}"#)
        .execute(&t.pool)
        .await
        .unwrap();

    // Create the rule via the API
    let resp = t
        .app
        .clone()
        .oneshot(
            t.identified(Request::builder().method("POST").uri("/api/rules"))
                .header("content-type", "application/json")
                .body(Body::from(rule_body()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Report the change event
    let event = serde_json::json!({
        "event": "updated",
        "entity": "lead",
        "record": {"id": "r1", "status": "stale", "name": "Ana"}
    });
    let resp = t
        .app
        .clone()
        .oneshot(
            t.identified(Request::builder().method("POST").uri("/api/events"))
                .header("content-type", "application/json")
                .body(Body::from(event.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["fired"].as_array().unwrap().len(), 1);

    // The lead's status was rewritten through the record store
    let (data,): (String,) = sqlx::query_as("SELECT data FROM crm_leads WHERE id = 'r1'")
        .fetch_one(&t.pool)
        .await
        .unwrap();
    let data: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(data["status"], "closed");

    // And the execution was audited
    let (status,): (String,) = sqlx::query_as("SELECT status FROM execution_log")
        .fetch_one(&t.pool)
        .await
        .unwrap();
    assert_eq!(status, "succeeded");
}

#[tokio::test]
async fn should_report_zero_fired_rules_when_nothing_matches() {
    let t = app().await;

    let event = serde_json::json!({
        "event": "created",
        "entity": "invoice",
        "record": {"id": "inv-1", "amount": 100}
    });
    let req = t
        .identified(Request::builder().method("POST").uri("/api/events"))
        .header("content-type", "application/json")
        .body(Body::from(event.to_string()))
        .unwrap();
    let resp = t.app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn should_reject_event_for_unknown_entity() {
    let t = app().await;

    let event = serde_json::json!({
        "event": "created",
        "entity": "spaceship",
        "record": {"id": "x"}
    });
    let req = t
        .identified(Request::builder().method("POST").uri("/api/events"))
        .header("content-type", "application/json")
        .body(Body::from(event.to_string()))
        .unwrap();
    let resp = t.app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Access resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_resolve_access_for_identified_caller() {
    let t = app().await;
    t.grant("crm.read_all").await;

    let req = t
        .identified(Request::builder().uri("/api/access"))
        .body(Body::empty())
        .unwrap();
    let resp = t.app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["permissions"], serde_json::json!(["crm.read_all"]));
}

#[tokio::test]
async fn should_reject_access_resolution_without_identity() {
    let t = app().await;

    let resp = t
        .app
        .oneshot(
            Request::builder()
                .uri("/api/access")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_return_field_access_for_module() {
    let t = app().await;
    t.grant("hr.field.salary.read").await;

    let req = t
        .identified(Request::builder().uri("/api/access/fields/hr"))
        .body(Body::empty())
        .unwrap();
    let resp = t.app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["tier"], "limited");
    assert_eq!(body["readable"], serde_json::json!(["salary"]));
}
