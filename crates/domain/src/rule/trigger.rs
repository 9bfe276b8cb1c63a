//! Trigger — the event pattern that activates a rule.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::event::{ChangeEvent, ChangeKind};

use super::Condition;

/// Describes which change events a rule reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    /// The change kind to react to.
    pub event: ChangeKind,
    /// The entity kind the rule watches.
    pub entity: Entity,
    /// Guards that must all hold against the changed record.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Trigger {
    /// Check whether this trigger matches an event, conditions included.
    ///
    /// Conditions are ANDed and short-circuit on the first failure; a
    /// trigger with no conditions matches vacuously.
    #[must_use]
    pub fn matches_event(&self, event: &ChangeEvent) -> bool {
        self.event == event.kind
            && self.entity == event.entity
            && self.conditions.iter().all(|c| c.evaluate(&event.record))
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} ({} conditions)",
            self.entity,
            self.event,
            self.conditions.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TenantId;
    use crate::rule::Operator;
    use serde_json::json;

    fn updated_lead(record: serde_json::Value) -> ChangeEvent {
        ChangeEvent::new(ChangeKind::Updated, Entity::Lead, record, TenantId::new())
    }

    #[test]
    fn should_match_when_event_and_entity_match_without_conditions() {
        let trigger = Trigger {
            event: ChangeKind::Updated,
            entity: Entity::Lead,
            conditions: vec![],
        };
        assert!(trigger.matches_event(&updated_lead(json!({"id": "r1"}))));
    }

    #[test]
    fn should_not_match_when_entity_differs() {
        let trigger = Trigger {
            event: ChangeKind::Updated,
            entity: Entity::Contact,
            conditions: vec![],
        };
        assert!(!trigger.matches_event(&updated_lead(json!({"id": "r1"}))));
    }

    #[test]
    fn should_not_match_when_change_kind_differs() {
        let trigger = Trigger {
            event: ChangeKind::Created,
            entity: Entity::Lead,
            conditions: vec![],
        };
        assert!(!trigger.matches_event(&updated_lead(json!({"id": "r1"}))));
    }

    #[test]
    fn should_require_all_conditions_to_hold() {
        let trigger = Trigger {
            event: ChangeKind::Updated,
            entity: Entity::Lead,
            conditions: vec![
                Condition {
                    field: "status".to_string(),
                    operator: Operator::Equals,
                    value: json!("open"),
                },
                Condition {
                    field: "score".to_string(),
                    operator: Operator::GreaterThan,
                    value: json!(50),
                },
            ],
        };
        assert!(trigger.matches_event(&updated_lead(json!({"status": "open", "score": 80}))));
        assert!(!trigger.matches_event(&updated_lead(json!({"status": "open", "score": 10}))));
        assert!(!trigger.matches_event(&updated_lead(json!({"status": "closed", "score": 80}))));
    }

    #[test]
    fn should_deserialize_trigger_with_default_conditions() {
        let trigger: Trigger = serde_json::from_value(json!({
            "event": "created",
            "entity": "candidate"
        }))
        .unwrap();
        assert!(trigger.conditions.is_empty());
        assert_eq!(trigger.entity, Entity::Candidate);
    }

    #[test]
    fn should_roundtrip_trigger_through_serde_json() {
        let trigger = Trigger {
            event: ChangeKind::StatusChanged,
            entity: Entity::Invoice,
            conditions: vec![Condition {
                field: "amount".to_string(),
                operator: Operator::GreaterThan,
                value: json!(1000),
            }],
        };
        let json = serde_json::to_string(&trigger).unwrap();
        let parsed: Trigger = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trigger);
    }
}
