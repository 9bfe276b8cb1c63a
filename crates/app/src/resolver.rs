//! Access resolver — builds a [`UserAccess`] snapshot for a request.
//!
//! The resolver asks the permission directory for the user's permission
//! keys and roles. The two lookups are independent: when one fails, that
//! half degrades to an empty set (fail closed) instead of failing the
//! request, so a directory outage can only ever remove access.

use rulehub_domain::access::{Environment, RequestContext, UserAccess};

use crate::ports::PermissionDirectory;

/// Resolves the effective access of a request context.
pub struct AccessResolver<D> {
    directory: D,
    environment: Environment,
    dev_bypass: bool,
}

impl<D: PermissionDirectory> AccessResolver<D> {
    /// Create a resolver over the given directory.
    ///
    /// `dev_bypass` grants unrestricted access to every request, but only
    /// outside [`Environment::Production`]; in production the flag is
    /// ignored no matter how it was configured.
    pub fn new(directory: D, environment: Environment, dev_bypass: bool) -> Self {
        Self {
            directory,
            environment,
            dev_bypass,
        }
    }

    /// Whether the development bypass is in effect.
    #[must_use]
    pub fn bypass_active(&self) -> bool {
        !self.environment.is_production() && self.dev_bypass
    }

    /// Resolve the permissions and roles of the context's user.
    #[tracing::instrument(skip(self), fields(user_id = %ctx.user_id, tenant_id = %ctx.tenant_id))]
    pub async fn resolve(&self, ctx: &RequestContext) -> UserAccess {
        if self.bypass_active() {
            tracing::debug!("development bypass active, granting unrestricted access");
            return UserAccess::all_access();
        }

        let permissions = match self.directory.fetch_permissions(ctx).await {
            Ok(permissions) => permissions,
            Err(error) => {
                tracing::warn!(%error, "permission lookup failed, degrading to empty set");
                Vec::new()
            }
        };
        let roles = match self.directory.fetch_roles(ctx).await {
            Ok(roles) => roles,
            Err(error) => {
                tracing::warn!(%error, "role lookup failed, degrading to empty set");
                Vec::new()
            }
        };

        UserAccess {
            permissions,
            roles,
            unrestricted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulehub_domain::access::Role;
    use rulehub_domain::error::RuleHubError;
    use rulehub_domain::id::{TenantId, UserId};
    use std::future::Future;

    struct FakeDirectory {
        permissions: Result<Vec<String>, &'static str>,
        roles: Result<Vec<Role>, &'static str>,
    }

    impl FakeDirectory {
        fn granting(permissions: &[&str], roles: &[&str]) -> Self {
            Self {
                permissions: Ok(permissions.iter().map(ToString::to_string).collect()),
                roles: Ok(roles
                    .iter()
                    .map(|key| Role {
                        key: (*key).to_string(),
                        label: (*key).to_string(),
                    })
                    .collect()),
            }
        }
    }

    impl PermissionDirectory for FakeDirectory {
        fn fetch_permissions(
            &self,
            _ctx: &RequestContext,
        ) -> impl Future<Output = Result<Vec<String>, RuleHubError>> + Send {
            let result = self
                .permissions
                .clone()
                .map_err(|msg| RuleHubError::Storage(msg.into()));
            async { result }
        }

        fn fetch_roles(
            &self,
            _ctx: &RequestContext,
        ) -> impl Future<Output = Result<Vec<Role>, RuleHubError>> + Send {
            let result = self
                .roles
                .clone()
                .map_err(|msg| RuleHubError::Storage(msg.into()));
            async { result }
        }
    }

    fn ctx() -> RequestContext {
        RequestContext {
            user_id: UserId::new(),
            tenant_id: TenantId::new(),
        }
    }

    #[tokio::test]
    async fn should_resolve_permissions_and_roles_from_directory() {
        let directory = FakeDirectory::granting(&["crm.read_all", "automation.manage"], &["admin"]);
        let resolver = AccessResolver::new(directory, Environment::Production, false);

        let access = resolver.resolve(&ctx()).await;

        assert!(access.has_permission("crm.read_all"));
        assert!(access.has_role("admin"));
        assert!(!access.unrestricted);
    }

    #[tokio::test]
    async fn should_degrade_to_empty_permissions_when_lookup_fails() {
        let directory = FakeDirectory {
            permissions: Err("directory unreachable"),
            roles: Ok(vec![Role {
                key: "viewer".to_string(),
                label: "Viewer".to_string(),
            }]),
        };
        let resolver = AccessResolver::new(directory, Environment::Production, false);

        let access = resolver.resolve(&ctx()).await;

        assert!(access.permissions.is_empty());
        // Role lookup is independent and still succeeds.
        assert!(access.has_role("viewer"));
    }

    #[tokio::test]
    async fn should_degrade_to_empty_roles_when_lookup_fails() {
        let directory = FakeDirectory {
            permissions: Ok(vec!["hr.read_all".to_string()]),
            roles: Err("directory unreachable"),
        };
        let resolver = AccessResolver::new(directory, Environment::Production, false);

        let access = resolver.resolve(&ctx()).await;

        assert!(access.has_permission("hr.read_all"));
        assert!(access.roles.is_empty());
    }

    #[tokio::test]
    async fn should_grant_all_access_under_development_bypass() {
        let directory = FakeDirectory {
            permissions: Err("never called"),
            roles: Err("never called"),
        };
        let resolver = AccessResolver::new(directory, Environment::Development, true);

        let access = resolver.resolve(&ctx()).await;

        assert!(access.unrestricted);
        assert!(access.has_permission("anything.at.all"));
    }

    #[tokio::test]
    async fn should_never_bypass_in_production() {
        let directory = FakeDirectory::granting(&[], &[]);
        let resolver = AccessResolver::new(directory, Environment::Production, true);

        assert!(!resolver.bypass_active());
        let access = resolver.resolve(&ctx()).await;
        assert!(!access.unrestricted);
        assert!(!access.has_permission("crm.read_all"));
    }

    #[tokio::test]
    async fn should_not_bypass_in_development_when_flag_is_off() {
        let directory = FakeDirectory::granting(&["ats.read_all"], &[]);
        let resolver = AccessResolver::new(directory, Environment::Development, false);

        let access = resolver.resolve(&ctx()).await;
        assert!(!access.unrestricted);
        assert!(access.has_permission("ats.read_all"));
    }
}
