//! Rule repository port — persistence for rules.

use std::future::Future;

use rulehub_domain::entity::Entity;
use rulehub_domain::error::RuleHubError;
use rulehub_domain::event::ChangeKind;
use rulehub_domain::id::RuleId;
use rulehub_domain::rule::Rule;

/// Repository for persisting and querying [`Rule`]s.
pub trait RuleRepository {
    /// Create a new rule in storage.
    fn create(&self, rule: Rule) -> impl Future<Output = Result<Rule, RuleHubError>> + Send;

    /// Get a rule by its unique identifier.
    fn get_by_id(
        &self,
        id: RuleId,
    ) -> impl Future<Output = Result<Option<Rule>, RuleHubError>> + Send;

    /// Get all rules.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Rule>, RuleHubError>> + Send;

    /// Get all enabled rules.
    fn get_enabled(&self) -> impl Future<Output = Result<Vec<Rule>, RuleHubError>> + Send;

    /// Get enabled rules whose trigger watches the given event kind and
    /// entity. Condition evaluation stays with the caller.
    fn find_matching(
        &self,
        event: ChangeKind,
        entity: Entity,
    ) -> impl Future<Output = Result<Vec<Rule>, RuleHubError>> + Send;

    /// Update an existing rule.
    fn update(&self, rule: Rule) -> impl Future<Output = Result<Rule, RuleHubError>> + Send;

    /// Delete a rule by its unique identifier.
    fn delete(&self, id: RuleId) -> impl Future<Output = Result<(), RuleHubError>> + Send;
}
