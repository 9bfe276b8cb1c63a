//! Rule engine — evaluates rules against change events and runs actions.
//!
//! For each incoming event the engine loads the enabled rules watching
//! that event kind and entity, evaluates their conditions, and — for each
//! match — executes the actions strictly in array order. Action execution
//! is best-effort: a failing action is written to the execution log and
//! the remaining actions still run. There is no retry and no rollback;
//! every failure is terminal for that action within the current pass.

use rulehub_domain::error::{NotFoundError, RuleHubError};
use rulehub_domain::event::ChangeEvent;
use rulehub_domain::id::{RuleId, UserId};
use rulehub_domain::record::interpolate;
use rulehub_domain::rule::{Action, Rule};
use rulehub_domain::time;

use crate::ports::event_bus::RuleTriggered;
use crate::ports::{
    EmailJob, EmailQueue, EventPublisher, ExecutionLog, ExecutionRecord, ExecutionStatus,
    Notification, NotificationSink, RecordStore, RuleRepository, TaskRow, TaskSink, WebhookClient,
    WebhookEnvelope, WebhookRequest,
};

/// Synchronous (per-request) rule engine over the outbound ports.
pub struct RuleEngine<R, S, Q, N, T, W, L, P> {
    rules: R,
    records: S,
    emails: Q,
    notifications: N,
    tasks: T,
    webhooks: W,
    log: L,
    publisher: P,
}

impl<R, S, Q, N, T, W, L, P> RuleEngine<R, S, Q, N, T, W, L, P>
where
    R: RuleRepository,
    S: RecordStore,
    Q: EmailQueue,
    N: NotificationSink,
    T: TaskSink,
    W: WebhookClient,
    L: ExecutionLog,
    P: EventPublisher,
{
    /// Create a new engine over the given ports.
    #[expect(clippy::too_many_arguments, reason = "composition root wiring")]
    pub fn new(
        rules: R,
        records: S,
        emails: Q,
        notifications: N,
        tasks: T,
        webhooks: W,
        log: L,
        publisher: P,
    ) -> Self {
        Self {
            rules,
            records,
            emails,
            notifications,
            tasks,
            webhooks,
            log,
            publisher,
        }
    }

    /// Process a single change event against all matching enabled rules.
    ///
    /// Rules run in ascending `priority` order (lower number first); the
    /// actions of one rule run strictly in array order. Returns the ids of
    /// the rules that fired.
    ///
    /// # Errors
    ///
    /// Returns a storage error if loading the candidate rules fails.
    /// Action failures never propagate — they are logged per action.
    #[tracing::instrument(skip(self, event), fields(event_id = %event.id, entity = %event.entity, kind = %event.kind))]
    pub async fn process_event(&self, event: &ChangeEvent) -> Result<Vec<RuleId>, RuleHubError> {
        let mut candidates = self.rules.find_matching(event.kind, event.entity).await?;
        candidates.sort_by_key(|rule| rule.priority);

        let mut fired = Vec::new();
        for rule in &candidates {
            if !rule.matches(event) {
                continue;
            }

            tracing::debug!(rule_id = %rule.id, rule_name = %rule.name, "rule matched");
            self.execute_rule(rule, event).await;

            // Fire-and-forget notification for observers.
            let _ = self
                .publisher
                .publish(RuleTriggered {
                    rule_id: rule.id,
                    rule_name: rule.name.clone(),
                    event_id: event.id,
                    at: time::now(),
                })
                .await;

            fired.push(rule.id);
        }

        Ok(fired)
    }

    /// Execute all actions of one rule, best-effort.
    ///
    /// Every attempt writes one execution record. A failing log write is
    /// itself only traced — audit must never break the action loop.
    async fn execute_rule(&self, rule: &Rule, event: &ChangeEvent) {
        for action in &rule.actions {
            let outcome = self.execute_action(action, rule, event).await;
            let (status, error_message) = match outcome {
                Ok(()) => (ExecutionStatus::Succeeded, None),
                Err(err) => {
                    tracing::warn!(
                        rule_id = %rule.id,
                        action = action.kind(),
                        error = %err,
                        "action failed, continuing with remaining actions"
                    );
                    (ExecutionStatus::Failed, Some(err.to_string()))
                }
            };

            let entry = ExecutionRecord {
                rule_id: rule.id,
                action_type: action.kind(),
                status,
                error_message,
                record_id: event.record_id(),
                record_type: event.entity.name().to_string(),
                executed_at: time::now(),
            };
            if let Err(err) = self.log.record(entry).await {
                tracing::error!(rule_id = %rule.id, error = %err, "failed to write execution record");
            }
        }
    }

    /// Execute a single action.
    async fn execute_action(
        &self,
        action: &Action,
        rule: &Rule,
        event: &ChangeEvent,
    ) -> Result<(), RuleHubError> {
        let record = &event.record;
        match action {
            Action::UpdateField {
                table,
                field,
                value,
            } => {
                let table = table.as_deref().unwrap_or_else(|| event.entity.table());
                self.records
                    .update_field(table, &event.record_id(), field, value.clone())
                    .await
            }
            Action::SendEmail { to, subject, body } => {
                self.emails
                    .enqueue(EmailJob {
                        to: interpolate(to, record),
                        subject: interpolate(subject, record),
                        body: interpolate(body, record),
                    })
                    .await
            }
            Action::SendNotification {
                user_id,
                title,
                message,
            } => {
                let recipient = user_id
                    .or_else(|| assigned_user(record))
                    .ok_or_else(|| NotFoundError {
                        kind: "notification recipient",
                        id: event.record_id(),
                    })?;
                self.notifications
                    .insert(Notification {
                        user_id: recipient,
                        title: interpolate(title, record),
                        message: interpolate(message, record),
                    })
                    .await
            }
            Action::CreateTask {
                title,
                description,
                assignee,
                due_in_days,
            } => {
                let due_date = due_in_days.map(|days| time::now() + chrono::Duration::days(days));
                self.tasks
                    .insert(TaskRow {
                        title: interpolate(title, record),
                        description: interpolate(description, record),
                        assignee: assignee.or_else(|| assigned_user(record)),
                        due_date,
                        record_id: event.record_id(),
                        record_type: event.entity.name().to_string(),
                    })
                    .await
            }
            Action::Webhook {
                url,
                method,
                headers,
            } => {
                self.webhooks
                    .deliver(WebhookRequest {
                        url: url.clone(),
                        method: *method,
                        headers: headers.clone(),
                        envelope: WebhookEnvelope {
                            event: event.kind,
                            entity: event.entity,
                            record: record.clone(),
                            rule_id: rule.id,
                        },
                    })
                    .await
            }
            Action::AssignTo { user_id } => {
                self.records
                    .update_field(
                        event.entity.table(),
                        &event.record_id(),
                        "assigned_to",
                        serde_json::json!(user_id),
                    )
                    .await
            }
            Action::ChangeStatus { status } => {
                self.records
                    .update_field(
                        event.entity.table(),
                        &event.record_id(),
                        "status",
                        serde_json::json!(status),
                    )
                    .await
            }
        }
    }
}

/// The record's `assigned_to` field as a user id, when present and valid.
fn assigned_user(record: &serde_json::Value) -> Option<UserId> {
    record
        .get("assigned_to")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok())
}
