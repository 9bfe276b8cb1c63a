//! `SQLite` implementation of [`RuleRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use rulehub_app::ports::RuleRepository;
use rulehub_domain::entity::{Entity, Module};
use rulehub_domain::error::RuleHubError;
use rulehub_domain::event::ChangeKind;
use rulehub_domain::id::RuleId;
use rulehub_domain::rule::{Action, Rule, Trigger};

use crate::error::StorageError;

struct Wrapper(Rule);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Rule> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let module: String = row.try_get("module")?;
        let enabled: bool = row.try_get("enabled")?;
        let priority: i32 = row.try_get("priority")?;
        let trigger_json: String = row.try_get("trigger_data")?;
        let actions_json: String = row.try_get("actions")?;

        let id = RuleId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let module =
            Module::from_str(&module).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let trigger: Trigger = serde_json::from_str(&trigger_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let actions: Vec<Action> = serde_json::from_str(&actions_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Rule {
            id,
            name,
            module,
            trigger,
            actions,
            enabled,
            priority,
        }))
    }
}

/// `SQLite`-backed rule repository.
pub struct SqliteRuleRepository {
    pool: SqlitePool,
}

impl SqliteRuleRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RuleRepository for SqliteRuleRepository {
    async fn create(&self, rule: Rule) -> Result<Rule, RuleHubError> {
        let id = rule.id.to_string();
        let trigger_json = serde_json::to_string(&rule.trigger).map_err(StorageError::from)?;
        let actions_json = serde_json::to_string(&rule.actions).map_err(StorageError::from)?;

        sqlx::query(
            "INSERT INTO rules (id, name, module, enabled, priority, trigger_data, actions) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&rule.name)
        .bind(rule.module.to_string())
        .bind(rule.enabled)
        .bind(rule.priority)
        .bind(&trigger_json)
        .bind(&actions_json)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(rule)
    }

    async fn get_by_id(&self, id: RuleId) -> Result<Option<Rule>, RuleHubError> {
        let row: Option<Wrapper> = sqlx::query_as("SELECT * FROM rules WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Rule>, RuleHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as("SELECT * FROM rules ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn get_enabled(&self) -> Result<Vec<Rule>, RuleHubError> {
        let rows: Vec<Wrapper> =
            sqlx::query_as("SELECT * FROM rules WHERE enabled = 1 ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_matching(
        &self,
        event: ChangeKind,
        entity: Entity,
    ) -> Result<Vec<Rule>, RuleHubError> {
        // Trigger event and entity live inside the trigger JSON document;
        // condition evaluation stays in the domain.
        let rows: Vec<Wrapper> = sqlx::query_as(
            "SELECT * FROM rules WHERE enabled = 1 \
             AND json_extract(trigger_data, '$.event') = ? \
             AND json_extract(trigger_data, '$.entity') = ? \
             ORDER BY priority",
        )
        .bind(event.to_string())
        .bind(entity.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, rule: Rule) -> Result<Rule, RuleHubError> {
        let id = rule.id.to_string();
        let trigger_json = serde_json::to_string(&rule.trigger).map_err(StorageError::from)?;
        let actions_json = serde_json::to_string(&rule.actions).map_err(StorageError::from)?;

        sqlx::query(
            "UPDATE rules SET name = ?, module = ?, enabled = ?, priority = ?, trigger_data = ?, actions = ? WHERE id = ?",
        )
        .bind(&rule.name)
        .bind(rule.module.to_string())
        .bind(rule.enabled)
        .bind(rule.priority)
        .bind(&trigger_json)
        .bind(&actions_json)
        .bind(&id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;

        Ok(rule)
    }

    async fn delete(&self, id: RuleId) -> Result<(), RuleHubError> {
        sqlx::query("DELETE FROM rules WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
