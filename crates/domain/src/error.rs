//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RuleHubError`] via `#[from]`. Adapters wrap their library errors
//! (sqlx, reqwest, …) into the boxed [`RuleHubError::Storage`] variant.

/// Top-level error for domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum RuleHubError {
    /// A domain invariant was violated.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced object does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// An authorization check failed.
    #[error("{0}")]
    AccessDenied(#[from] AccessError),

    /// A persistence or transport failure from an adapter.
    #[error("adapter error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations, surfaced at rule-save time.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The rule name is empty.
    #[error("rule name must not be empty")]
    EmptyName,

    /// The rule declares no actions.
    #[error("rule must declare at least one action")]
    NoActions,

    /// The rule declares no trigger.
    #[error("rule must declare a trigger")]
    NoTrigger,

    /// The rule's module does not match its trigger entity's module.
    #[error("rule module does not match the trigger entity's module")]
    ModuleMismatch,

    /// An action config is malformed (bad URL, empty field name, …).
    #[error("invalid action config: {0}")]
    InvalidAction(&'static str),
}

/// A lookup for a specific object came back empty.
#[derive(Debug, thiserror::Error)]
#[error("{kind} not found: {id}")]
pub struct NotFoundError {
    /// Kind of object that was looked up, e.g. `"Rule"`.
    pub kind: &'static str,
    /// The identifier that was requested.
    pub id: String,
}

/// A `require_*` authorization guard failed.
///
/// Intended to propagate to a request boundary that converts it into an
/// HTTP 403 response.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The resolved permission set lacks the required key.
    #[error("missing permission: {0}")]
    MissingPermission(String),

    /// The resolved role set lacks the required key.
    #[error("missing role: {0}")]
    MissingRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_rulehub_error() {
        let err: RuleHubError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            RuleHubError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_display_not_found_with_kind_and_id() {
        let err = NotFoundError {
            kind: "Rule",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Rule not found: abc");
    }

    #[test]
    fn should_display_missing_permission_key() {
        let err = AccessError::MissingPermission("crm.leads.write".to_string());
        assert_eq!(err.to_string(), "missing permission: crm.leads.write");
    }
}
