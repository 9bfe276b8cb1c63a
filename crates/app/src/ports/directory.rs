//! Permission directory port — remote permission and role lookups.

use std::future::Future;

use rulehub_domain::access::{RequestContext, Role};
use rulehub_domain::error::RuleHubError;

/// The two remote procedures backing access resolution.
///
/// Both are scoped to `(user, tenant)` and are called independently; the
/// resolver degrades each failure to an empty set rather than propagating.
pub trait PermissionDirectory {
    /// Fetch the permission keys granted to the context's user.
    fn fetch_permissions(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<Vec<String>, RuleHubError>> + Send;

    /// Fetch the roles granted to the context's user.
    fn fetch_roles(
        &self,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<Vec<Role>, RuleHubError>> + Send;
}
