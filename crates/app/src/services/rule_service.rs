//! Rule service — use-cases for managing automation rules.

use rulehub_domain::error::{NotFoundError, RuleHubError};
use rulehub_domain::id::RuleId;
use rulehub_domain::rule::Rule;

use crate::ports::RuleRepository;

/// Application service for rule CRUD operations.
///
/// Rules are validated before every save, so the repository only ever
/// holds well-formed rules and the engine never re-validates at
/// execution time.
pub struct RuleService<R> {
    repo: R,
}

impl<R: RuleRepository> RuleService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new rule after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RuleHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, rule), fields(rule_name = %rule.name))]
    pub async fn create_rule(&self, rule: Rule) -> Result<Rule, RuleHubError> {
        rule.validate()?;
        self.repo.create(rule).await
    }

    /// Look up a rule by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`RuleHubError::NotFound`] when no rule with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_rule(&self, id: RuleId) -> Result<Rule, RuleHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                kind: "Rule",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all rules, enabled or not.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rules(&self) -> Result<Vec<Rule>, RuleHubError> {
        self.repo.get_all().await
    }

    /// List the enabled rules.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_enabled(&self) -> Result<Vec<Rule>, RuleHubError> {
        self.repo.get_enabled().await
    }

    /// Update an existing rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleHubError::Validation`] if invariants fail, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, rule))]
    pub async fn update_rule(&self, rule: Rule) -> Result<Rule, RuleHubError> {
        rule.validate()?;
        self.repo.update(rule).await
    }

    /// Delete a rule by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_rule(&self, id: RuleId) -> Result<(), RuleHubError> {
        self.repo.delete(id).await
    }
}
