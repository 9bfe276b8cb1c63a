//! Access — per-tenant permissions, roles, and field-level access.
//!
//! Permission and role keys are resolved remotely per request; this module
//! only holds the resolved sets and the pure checks over them. Callers pass
//! an explicit [`RequestContext`] — there is no ambient session state.

use serde::{Deserialize, Serialize};

use crate::entity::Module;
use crate::error::AccessError;
use crate::id::{TenantId, UserId};

/// The identity a request acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: UserId,
    pub tenant_id: TenantId,
}

/// Deployment environment, controlling the development-only access bypass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Whether this is the production environment.
    #[must_use]
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// A role granted to a user within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable key, e.g. `"admin"`.
    pub key: String,
    /// Human-readable label, e.g. `"Administrator"`.
    pub label: String,
}

/// The resolved permissions and roles of one user in one tenant.
///
/// Not cached beyond the request; an empty instance means "no access",
/// which is also what resolution failures degrade to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccess {
    pub permissions: Vec<String>,
    pub roles: Vec<Role>,
    /// Set only by the development bypass; short-circuits every check.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unrestricted: bool,
}

impl UserAccess {
    /// An access set that passes every check. Development bypass only.
    #[must_use]
    pub fn all_access() -> Self {
        Self {
            permissions: Vec::new(),
            roles: Vec::new(),
            unrestricted: true,
        }
    }

    /// Whether the permission key is granted.
    #[must_use]
    pub fn has_permission(&self, key: &str) -> bool {
        self.unrestricted || self.permissions.iter().any(|p| p == key)
    }

    /// Whether any of the permission keys is granted.
    #[must_use]
    pub fn has_any_permission(&self, keys: &[&str]) -> bool {
        self.unrestricted || keys.iter().any(|key| self.has_permission(key))
    }

    /// Whether all of the permission keys are granted.
    #[must_use]
    pub fn has_all_permissions(&self, keys: &[&str]) -> bool {
        self.unrestricted || keys.iter().all(|key| self.has_permission(key))
    }

    /// Whether the role key is granted.
    #[must_use]
    pub fn has_role(&self, key: &str) -> bool {
        self.unrestricted || self.roles.iter().any(|r| r.key == key)
    }

    /// Fail unless the permission key is granted.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MissingPermission`] carrying the key.
    pub fn require_permission(&self, key: &str) -> Result<(), AccessError> {
        if self.has_permission(key) {
            Ok(())
        } else {
            Err(AccessError::MissingPermission(key.to_string()))
        }
    }

    /// Fail unless the role key is granted.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MissingRole`] carrying the key.
    pub fn require_role(&self, key: &str) -> Result<(), AccessError> {
        if self.has_role(key) {
            Ok(())
        } else {
            Err(AccessError::MissingRole(key.to_string()))
        }
    }

    /// Derive coarse field-level access for a module from permission keys.
    ///
    /// Two tiers only: `<module>.read_all` grants everything; otherwise
    /// `<module>.field.<name>.read` / `.write` keys are collected into
    /// explicit field lists. This is a heuristic, not a general ACL engine.
    #[must_use]
    pub fn field_access(&self, module: Module) -> FieldAccess {
        if self.unrestricted || self.has_permission(&format!("{module}.read_all")) {
            return FieldAccess::All;
        }
        let prefix = format!("{module}.field.");
        let mut readable = Vec::new();
        let mut writable = Vec::new();
        for key in &self.permissions {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            if let Some(field) = rest.strip_suffix(".read") {
                readable.push(field.to_string());
            } else if let Some(field) = rest.strip_suffix(".write") {
                writable.push(field.to_string());
            }
        }
        FieldAccess::Limited { readable, writable }
    }
}

/// Coarse two-tier field-level access for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum FieldAccess {
    /// Every field is readable and writable.
    All,
    /// Only the listed fields are accessible.
    Limited {
        readable: Vec<String>,
        writable: Vec<String>,
    },
}

impl FieldAccess {
    /// Whether the named field may be read.
    #[must_use]
    pub fn can_read(&self, field: &str) -> bool {
        match self {
            Self::All => true,
            Self::Limited { readable, .. } => readable.iter().any(|f| f == field),
        }
    }

    /// Whether the named field may be written.
    #[must_use]
    pub fn can_write(&self, field: &str) -> bool {
        match self {
            Self::All => true,
            Self::Limited { writable, .. } => writable.iter().any(|f| f == field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(permissions: &[&str], roles: &[(&str, &str)]) -> UserAccess {
        UserAccess {
            permissions: permissions.iter().map(ToString::to_string).collect(),
            roles: roles
                .iter()
                .map(|(key, label)| Role {
                    key: (*key).to_string(),
                    label: (*label).to_string(),
                })
                .collect(),
            unrestricted: false,
        }
    }

    #[test]
    fn should_check_single_permission() {
        let a = access(&["crm.leads.read"], &[]);
        assert!(a.has_permission("crm.leads.read"));
        assert!(!a.has_permission("crm.leads.write"));
    }

    #[test]
    fn should_check_any_and_all_permissions() {
        let a = access(&["crm.leads.read", "crm.leads.write"], &[]);
        assert!(a.has_any_permission(&["hr.view", "crm.leads.read"]));
        assert!(!a.has_any_permission(&["hr.view", "finance.view"]));
        assert!(a.has_all_permissions(&["crm.leads.read", "crm.leads.write"]));
        assert!(!a.has_all_permissions(&["crm.leads.read", "hr.view"]));
    }

    #[test]
    fn should_check_roles_by_key() {
        let a = access(&[], &[("admin", "Administrator")]);
        assert!(a.has_role("admin"));
        assert!(!a.has_role("recruiter"));
    }

    #[test]
    fn should_require_permission_and_carry_key_in_error() {
        let a = access(&["crm.leads.read"], &[]);
        assert!(a.require_permission("crm.leads.read").is_ok());
        let err = a.require_permission("crm.leads.write").unwrap_err();
        assert_eq!(
            err,
            AccessError::MissingPermission("crm.leads.write".to_string())
        );
    }

    #[test]
    fn should_require_role_and_carry_key_in_error() {
        let a = access(&[], &[("admin", "Administrator")]);
        assert!(a.require_role("admin").is_ok());
        let err = a.require_role("recruiter").unwrap_err();
        assert_eq!(err, AccessError::MissingRole("recruiter".to_string()));
    }

    #[test]
    fn should_pass_every_check_when_unrestricted() {
        let a = UserAccess::all_access();
        assert!(a.has_permission("anything.at.all"));
        assert!(a.has_role("anything"));
        assert!(a.require_permission("anything").is_ok());
        assert_eq!(a.field_access(Module::Crm), FieldAccess::All);
    }

    #[test]
    fn should_deny_everything_on_empty_access() {
        let a = UserAccess::default();
        assert!(!a.has_permission("crm.leads.read"));
        assert!(!a.has_role("admin"));
        assert!(a.require_permission("crm.leads.read").is_err());
    }

    #[test]
    fn should_grant_all_fields_with_read_all_key() {
        let a = access(&["crm.read_all"], &[]);
        assert_eq!(a.field_access(Module::Crm), FieldAccess::All);
        // read_all is per module
        assert_ne!(a.field_access(Module::Hr), FieldAccess::All);
    }

    #[test]
    fn should_collect_field_lists_from_permission_keys() {
        let a = access(
            &[
                "hr.field.salary.read",
                "hr.field.name.read",
                "hr.field.name.write",
                "crm.field.status.read",
            ],
            &[],
        );
        let fa = a.field_access(Module::Hr);
        assert!(fa.can_read("salary"));
        assert!(!fa.can_write("salary"));
        assert!(fa.can_read("name"));
        assert!(fa.can_write("name"));
        assert!(!fa.can_read("status"));
    }

    #[test]
    fn should_roundtrip_user_access_through_serde_json() {
        let a = access(&["crm.leads.read"], &[("admin", "Administrator")]);
        let json = serde_json::to_string(&a).unwrap();
        let parsed: UserAccess = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, a);
    }
}
