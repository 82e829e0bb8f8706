//! `TemplateStore` implementation backed by the `email_templates` table.

use crate::SqliteMailStorage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ufund_mailer::{MailerError, StorageError, TemplateDefinition, TemplateRecord, TemplateStore};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SqliteEmailTemplate {
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub subject: String,
    pub html: String,
    pub source_file: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<SqliteEmailTemplate> for TemplateRecord {
    fn from(row: SqliteEmailTemplate) -> Self {
        TemplateRecord {
            template_id: row.template_id,
            name: row.name,
            description: row.description,
            subject: row.subject,
            html: row.html,
            source_file: row.source_file,
            is_active: row.is_active,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::from_timestamp(row.updated_at, 0).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl TemplateStore for SqliteMailStorage {
    async fn find_by_id(&self, template_id: &str) -> Result<Option<TemplateRecord>, MailerError> {
        let row = sqlx::query_as::<_, SqliteEmailTemplate>(
            "SELECT * FROM email_templates WHERE template_id = ?1",
        )
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(row.map(|r| r.into()))
    }

    async fn upsert(&self, definition: &TemplateDefinition) -> Result<TemplateRecord, MailerError> {
        let now = Utc::now().timestamp();

        // Content updates preserve the existing activation flag and
        // creation timestamp.
        let row = sqlx::query_as::<_, SqliteEmailTemplate>(
            r#"
            INSERT INTO email_templates (template_id, name, description, subject, html, source_file, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7)
            ON CONFLICT(template_id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                subject = excluded.subject,
                html = excluded.html,
                source_file = excluded.source_file,
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(&definition.template_id)
        .bind(&definition.name)
        .bind(&definition.description)
        .bind(&definition.subject)
        .bind(&definition.html)
        .bind(&definition.source_file)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(row.into())
    }

    async fn set_active(&self, template_id: &str, is_active: bool) -> Result<(), MailerError> {
        let result = sqlx::query(
            "UPDATE email_templates SET is_active = ?2, updated_at = ?3 WHERE template_id = ?1",
        )
        .bind(template_id)
        .bind(is_active)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound.into());
        }

        Ok(())
    }

    async fn all(&self) -> Result<Vec<TemplateRecord>, MailerError> {
        let rows = sqlx::query_as::<_, SqliteEmailTemplate>(
            "SELECT * FROM email_templates ORDER BY template_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::setup_storage;
    use std::sync::Arc;
    use ufund_mailer::{TemplateRegistry, TemplateStore, builtin_templates};

    #[tokio::test]
    async fn test_upsert_and_get() {
        let storage = setup_storage().await;
        let definition = builtin_templates()
            .into_iter()
            .find(|t| t.template_id == "WELCOME")
            .unwrap();

        let record = storage.upsert(&definition).await.unwrap();
        assert_eq!(record.template_id, "WELCOME");
        assert!(record.is_active);

        let fetched = storage.find_by_id("WELCOME").await.unwrap().unwrap();
        assert_eq!(fetched.subject, definition.subject);
        assert_eq!(fetched.html, definition.html);
        assert_eq!(fetched.source_file, "welcome.html");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let storage = setup_storage().await;
        assert!(storage.find_by_id("NONEXISTENT").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_preserves_deactivation() {
        let storage = setup_storage().await;
        let mut definition = builtin_templates()
            .into_iter()
            .find(|t| t.template_id == "WELCOME")
            .unwrap();

        storage.upsert(&definition).await.unwrap();
        storage.set_active("WELCOME", false).await.unwrap();

        // A content update must not silently re-enable the template.
        definition.subject = "Updated subject".to_string();
        let updated = storage.upsert(&definition).await.unwrap();
        assert_eq!(updated.subject, "Updated subject");
        assert!(!updated.is_active);
    }

    #[tokio::test]
    async fn test_set_active_missing_template() {
        let storage = setup_storage().await;
        let err = storage.set_active("NONEXISTENT", false).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_registry_over_sqlite_store() {
        let storage = Arc::new(setup_storage().await);
        let registry = TemplateRegistry::new(storage.clone());

        let seeded = registry.sync_catalog().await.unwrap();
        assert_eq!(seeded, builtin_templates().len());
        assert_eq!(registry.sync_catalog().await.unwrap(), 0);

        let record = registry.lookup("WELCOME").await.unwrap();
        assert!(record.is_active);

        storage.set_active("WELCOME", false).await.unwrap();
        assert!(registry.lookup("WELCOME").await.unwrap_err().is_not_found());

        let all = storage.all().await.unwrap();
        assert_eq!(all.len(), builtin_templates().len());
    }
}
