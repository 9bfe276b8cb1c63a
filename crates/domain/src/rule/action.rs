//! Action — the effect performed when a rule fires.
//!
//! Each variant carries its own strongly-typed config, validated at rule
//! save time so the engine can trust whatever it loads from storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::UserId;

/// HTTP method used by the webhook action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Post,
    Put,
    Patch,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        };
        f.write_str(name)
    }
}

/// An operation to execute when a rule's trigger matches and all
/// conditions are satisfied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Write a value into one field of a record.
    UpdateField {
        /// Target table; defaults to the trigger entity's mapped table.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table: Option<String>,
        field: String,
        value: serde_json::Value,
    },
    /// Enqueue an email. Subject and body support `{{field}}` tokens.
    SendEmail {
        to: String,
        subject: String,
        body: String,
    },
    /// Insert a notification addressed to a user.
    SendNotification {
        /// Recipient; falls back to the record's `assigned_to` when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
        title: String,
        message: String,
    },
    /// Insert a task linked to the record.
    CreateTask {
        title: String,
        #[serde(default)]
        description: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        assignee: Option<UserId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        due_in_days: Option<i64>,
    },
    /// Deliver a JSON envelope to an outbound HTTP endpoint.
    Webhook {
        url: String,
        #[serde(default)]
        method: HttpMethod,
        #[serde(default)]
        headers: BTreeMap<String, String>,
    },
    /// Set `assigned_to` on the record.
    AssignTo { user_id: UserId },
    /// Set `status` on the record.
    ChangeStatus { status: String },
}

impl Action {
    /// The snake_case tag of this action, as written to the execution log.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpdateField { .. } => "update_field",
            Self::SendEmail { .. } => "send_email",
            Self::SendNotification { .. } => "send_notification",
            Self::CreateTask { .. } => "create_task",
            Self::Webhook { .. } => "webhook",
            Self::AssignTo { .. } => "assign_to",
            Self::ChangeStatus { .. } => "change_status",
        }
    }

    /// Check this action's config invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAction`] describing the first
    /// violated invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::UpdateField { field, .. } if field.is_empty() => Err(
                ValidationError::InvalidAction("update_field requires a field name"),
            ),
            Self::SendEmail { to, subject, .. } if to.is_empty() || subject.is_empty() => Err(
                ValidationError::InvalidAction("send_email requires a recipient and subject"),
            ),
            Self::SendNotification { title, .. } if title.is_empty() => Err(
                ValidationError::InvalidAction("send_notification requires a title"),
            ),
            Self::CreateTask { title, .. } if title.is_empty() => Err(
                ValidationError::InvalidAction("create_task requires a title"),
            ),
            Self::Webhook { url, .. }
                if !url.starts_with("http://") && !url.starts_with("https://") =>
            {
                Err(ValidationError::InvalidAction(
                    "webhook url must be http(s)",
                ))
            }
            Self::ChangeStatus { status } if status.is_empty() => Err(
                ValidationError::InvalidAction("change_status requires a status"),
            ),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpdateField { field, .. } => write!(f, "update_field({field})"),
            Self::SendEmail { to, .. } => write!(f, "send_email({to})"),
            Self::SendNotification { title, .. } => write!(f, "send_notification({title})"),
            Self::CreateTask { title, .. } => write!(f, "create_task({title})"),
            Self::Webhook { url, method, .. } => write!(f, "webhook({method} {url})"),
            Self::AssignTo { user_id } => write!(f, "assign_to({user_id})"),
            Self::ChangeStatus { status } => write!(f, "change_status({status})"),
        }
    }
}
