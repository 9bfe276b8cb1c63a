//! Condition — a field predicate that must hold for the rule to fire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record;

/// Comparison operator applied to a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
    In,
    NotIn,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::In => "in",
            Self::NotIn => "not_in",
        };
        f.write_str(name)
    }
}

/// A predicate over one record field.
///
/// All conditions on a trigger must be satisfied (logical AND); there is
/// no OR or grouping support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Dot-separated path into the record (`"status"`, `"owner.email"`).
    pub field: String,
    pub operator: Operator,
    /// Expected value; must be an array for `in`/`not_in`.
    pub value: Value,
}

impl Condition {
    /// Evaluate this condition against a record.
    ///
    /// Coercions never fail: a missing field makes the positive operators
    /// (`equals`, `contains`, `greater_than`, `less_than`, `in`) evaluate
    /// false and their negated counterparts evaluate true.
    #[must_use]
    pub fn evaluate(&self, rec: &Value) -> bool {
        let resolved = record::resolve_path(rec, &self.field);
        match self.operator {
            Operator::Equals => resolved == Some(&self.value),
            Operator::NotEquals => resolved != Some(&self.value),
            Operator::Contains => self.contains(resolved),
            Operator::NotContains => !self.contains(resolved),
            Operator::GreaterThan => Self::compare(resolved, &self.value, f64::gt),
            Operator::LessThan => Self::compare(resolved, &self.value, f64::lt),
            Operator::In => self.member_of(resolved),
            Operator::NotIn => !self.member_of(resolved),
        }
    }

    /// String-coerced substring test.
    fn contains(&self, resolved: Option<&Value>) -> bool {
        let Some(haystack) = record::coerce_string(resolved) else {
            return false;
        };
        let Some(needle) = record::coerce_string(Some(&self.value)) else {
            return false;
        };
        haystack.contains(&needle)
    }

    /// Numeric-coerced ordering comparison.
    fn compare(resolved: Option<&Value>, expected: &Value, cmp: fn(&f64, &f64) -> bool) -> bool {
        match (
            record::coerce_number(resolved),
            record::coerce_number(Some(expected)),
        ) {
            (Some(actual), Some(expected)) => cmp(&actual, &expected),
            _ => false,
        }
    }

    /// Array membership test; a non-array expected value never matches.
    fn member_of(&self, resolved: Option<&Value>) -> bool {
        match (self.value.as_array(), resolved) {
            (Some(candidates), Some(actual)) => candidates.contains(actual),
            _ => false,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}
