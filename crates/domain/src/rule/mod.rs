//! Rule — trigger → condition → action definitions.
//!
//! Rules let the system react to record changes without manual
//! intervention. Each rule has a [`Trigger`] (event kind + entity +
//! [`Condition`]s) and one or more [`Action`]s to execute. Rules are
//! immutable during an evaluation pass: the engine reads them but only
//! ever writes to queue, log, and entity tables.

mod action;
mod condition;
mod trigger;

pub use action::{Action, HttpMethod};
pub use condition::{Condition, Operator};
pub use trigger::Trigger;

use serde::{Deserialize, Serialize};

use crate::entity::Module;
use crate::error::{RuleHubError, ValidationError};
use crate::event::ChangeEvent;
use crate::id::RuleId;

/// A persisted automation rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    /// The product module this rule belongs to; must agree with the
    /// trigger entity's module.
    pub module: Module,
    pub trigger: Trigger,
    pub actions: Vec<Action>,
    pub enabled: bool,
    /// Evaluation order among rules matching the same event; lower
    /// numbers run first.
    pub priority: i32,
}

impl Rule {
    /// Default priority assigned when none is specified.
    pub const DEFAULT_PRIORITY: i32 = 100;

    /// Create a builder for constructing a [`Rule`].
    #[must_use]
    pub fn builder() -> RuleBuilder {
        RuleBuilder::default()
    }

    /// Check domain invariants, including per-action config validation.
    ///
    /// # Errors
    ///
    /// Returns [`RuleHubError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `actions` is empty ([`ValidationError::NoActions`])
    /// - `module` disagrees with the trigger entity
    ///   ([`ValidationError::ModuleMismatch`])
    /// - an action config is malformed ([`ValidationError::InvalidAction`])
    pub fn validate(&self) -> Result<(), RuleHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions.into());
        }
        if self.module != self.trigger.entity.module() {
            return Err(ValidationError::ModuleMismatch.into());
        }
        for action in &self.actions {
            action.validate()?;
        }
        Ok(())
    }

    /// Whether this rule fires for the given event.
    ///
    /// Disabled rules never fire. Conditions are ANDed inside
    /// [`Trigger::matches_event`].
    #[must_use]
    pub fn matches(&self, event: &ChangeEvent) -> bool {
        self.enabled && self.trigger.matches_event(event)
    }
}

/// Step-by-step builder for [`Rule`].
#[derive(Debug, Default)]
pub struct RuleBuilder {
    id: Option<RuleId>,
    name: Option<String>,
    module: Option<Module>,
    trigger: Option<Trigger>,
    actions: Vec<Action>,
    enabled: Option<bool>,
    priority: Option<i32>,
}

impl RuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the module explicitly; defaults to the trigger entity's module.
    #[must_use]
    pub fn module(mut self, module: Module) -> Self {
        self.module = Some(module);
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        if let Some(trigger) = self.trigger.as_mut() {
            trigger.conditions.push(condition);
        }
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Consume the builder, validate, and return a [`Rule`].
    ///
    /// # Errors
    ///
    /// Returns [`RuleHubError::Validation`] if required fields are missing
    /// or invalid; [`ValidationError::NoTrigger`] when no trigger was set.
    pub fn build(self) -> Result<Rule, RuleHubError> {
        let trigger = self.trigger.ok_or(ValidationError::NoTrigger)?;
        let rule = Rule {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            module: self.module.unwrap_or_else(|| trigger.entity.module()),
            trigger,
            actions: self.actions,
            enabled: self.enabled.unwrap_or(true),
            priority: self.priority.unwrap_or(Rule::DEFAULT_PRIORITY),
        };
        rule.validate()?;
        Ok(rule)
    }
}
