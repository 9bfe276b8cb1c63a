//! `SQLite` implementation of [`PermissionDirectory`].

use sqlx::SqlitePool;

use rulehub_app::ports::PermissionDirectory;
use rulehub_domain::access::{RequestContext, Role};
use rulehub_domain::error::RuleHubError;

use crate::error::StorageError;

/// `SQLite`-backed permission and role directory.
///
/// Grants are scoped per `(user, tenant)` pair; the same user can hold
/// different grants in different tenants.
pub struct SqlitePermissionDirectory {
    pool: SqlitePool,
}

impl SqlitePermissionDirectory {
    /// Create a new directory backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PermissionDirectory for SqlitePermissionDirectory {
    async fn fetch_permissions(&self, ctx: &RequestContext) -> Result<Vec<String>, RuleHubError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT permission FROM user_permissions WHERE user_id = ? AND tenant_id = ? ORDER BY permission",
        )
        .bind(ctx.user_id.as_uuid())
        .bind(ctx.tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|(permission,)| permission).collect())
    }

    async fn fetch_roles(&self, ctx: &RequestContext) -> Result<Vec<Role>, RuleHubError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT role_key, role_label FROM user_roles WHERE user_id = ? AND tenant_id = ? ORDER BY role_key",
        )
        .bind(ctx.user_id.as_uuid())
        .bind(ctx.tenant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|(key, label)| Role { key, label })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use rulehub_domain::id::{TenantId, UserId};

    async fn setup() -> (SqlitePool, SqlitePermissionDirectory) {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let pool = db.pool().clone();
        (pool.clone(), SqlitePermissionDirectory::new(pool))
    }

    async fn grant_permission(pool: &SqlitePool, ctx: &RequestContext, permission: &str) {
        sqlx::query(
            "INSERT INTO user_permissions (user_id, tenant_id, permission) VALUES (?, ?, ?)",
        )
        .bind(ctx.user_id.as_uuid())
        .bind(ctx.tenant_id.as_uuid())
        .bind(permission)
        .execute(pool)
        .await
        .unwrap();
    }

    fn ctx() -> RequestContext {
        RequestContext {
            user_id: UserId::new(),
            tenant_id: TenantId::new(),
        }
    }

    #[tokio::test]
    async fn should_fetch_permissions_for_user_in_tenant() {
        let (pool, directory) = setup().await;
        let ctx = ctx();
        grant_permission(&pool, &ctx, "crm.read_all").await;
        grant_permission(&pool, &ctx, "automation.manage").await;

        let permissions = directory.fetch_permissions(&ctx).await.unwrap();
        assert_eq!(permissions, vec!["automation.manage", "crm.read_all"]);
    }

    #[tokio::test]
    async fn should_not_leak_grants_across_tenants() {
        let (pool, directory) = setup().await;
        let ctx = ctx();
        grant_permission(&pool, &ctx, "crm.read_all").await;

        let other_tenant = RequestContext {
            user_id: ctx.user_id,
            tenant_id: TenantId::new(),
        };
        let permissions = directory.fetch_permissions(&other_tenant).await.unwrap();
        assert!(permissions.is_empty());
    }

    #[tokio::test]
    async fn should_fetch_roles_with_labels() {
        let (pool, directory) = setup().await;
        let ctx = ctx();
        sqlx::query(
            "INSERT INTO user_roles (user_id, tenant_id, role_key, role_label) VALUES (?, ?, ?, ?)",
        )
        .bind(ctx.user_id.as_uuid())
        .bind(ctx.tenant_id.as_uuid())
        .bind("admin")
        .bind("Administrator")
        .execute(&pool)
        .await
        .unwrap();

        let roles = directory.fetch_roles(&ctx).await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].key, "admin");
        assert_eq!(roles[0].label, "Administrator");
    }

    #[tokio::test]
    async fn should_return_empty_sets_for_unknown_user() {
        let (_pool, directory) = setup().await;
        let ctx = ctx();
        assert!(directory.fetch_permissions(&ctx).await.unwrap().is_empty());
        assert!(directory.fetch_roles(&ctx).await.unwrap().is_empty());
    }
}
