//! `EmailLogStore` implementation backed by the `email_logs` table.

use crate::SqliteMailStorage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ufund_mailer::{
    EmailLogEntry, EmailLogFilter, EmailLogId, EmailLogPage, EmailLogStore, EmailStatus,
    MailerError, NewEmailLog, StorageError, TemplateVars,
};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SqliteEmailLog {
    pub id: String,
    pub to_address: String,
    pub cc: String,
    pub bcc: String,
    pub template_id: String,
    pub variables: String,
    pub status: String,
    pub provider_message_id: Option<String>,
    pub error_message: Option<String>,
    pub user_id: Option<String>,
    pub event_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl SqliteEmailLog {
    fn into_entry(self) -> Result<EmailLogEntry, MailerError> {
        let variables: TemplateVars = serde_json::from_str(&self.variables)
            .map_err(|e| StorageError::Database(format!("Invalid variables JSON: {e}")))?;

        let status = EmailStatus::parse(&self.status).ok_or_else(|| {
            StorageError::Database(format!("Unknown email status: {}", self.status))
        })?;

        Ok(EmailLogEntry {
            id: EmailLogId::from(self.id),
            to: self.to_address,
            cc: self.cc,
            bcc: self.bcc,
            template_id: self.template_id,
            variables,
            status,
            provider_message_id: self.provider_message_id,
            error_message: self.error_message,
            user_id: self.user_id,
            event_id: self.event_id,
            created_at: DateTime::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        })
    }
}

#[async_trait]
impl EmailLogStore for SqliteMailStorage {
    async fn create_pending(&self, new_log: NewEmailLog) -> Result<EmailLogEntry, MailerError> {
        let now = Utc::now().timestamp();
        let variables = serde_json::to_string(&new_log.variables)
            .map_err(|e| StorageError::Database(format!("Failed to encode variables: {e}")))?;

        let row = sqlx::query_as::<_, SqliteEmailLog>(
            r#"
            INSERT INTO email_logs (id, to_address, cc, bcc, template_id, variables, status, user_id, event_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            RETURNING *
            "#,
        )
        .bind(new_log.id.as_str())
        .bind(&new_log.to)
        .bind(new_log.cc.join(","))
        .bind(new_log.bcc.join(","))
        .bind(&new_log.template_id)
        .bind(&variables)
        .bind(EmailStatus::Pending.as_str())
        .bind(&new_log.user_id)
        .bind(&new_log.event_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        row.into_entry()
    }

    async fn mark_sent(
        &self,
        id: &EmailLogId,
        provider_message_id: &str,
    ) -> Result<(), MailerError> {
        let result = sqlx::query(
            "UPDATE email_logs SET status = ?2, provider_message_id = ?3, updated_at = ?4 WHERE id = ?1",
        )
        .bind(id.as_str())
        .bind(EmailStatus::Sent.as_str())
        .bind(provider_message_id)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound.into());
        }

        Ok(())
    }

    async fn mark_failed(&self, id: &EmailLogId, error_message: &str) -> Result<(), MailerError> {
        let result = sqlx::query(
            "UPDATE email_logs SET status = ?2, error_message = ?3, updated_at = ?4 WHERE id = ?1",
        )
        .bind(id.as_str())
        .bind(EmailStatus::Failed.as_str())
        .bind(error_message)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound.into());
        }

        Ok(())
    }

    async fn get(&self, id: &EmailLogId) -> Result<Option<EmailLogEntry>, MailerError> {
        let row = sqlx::query_as::<_, SqliteEmailLog>("SELECT * FROM email_logs WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        row.map(SqliteEmailLog::into_entry).transpose()
    }

    async fn list(
        &self,
        filter: &EmailLogFilter,
        limit: u32,
        offset: u32,
    ) -> Result<EmailLogPage, MailerError> {
        let mut where_clause = String::from(" WHERE 1=1");
        if filter.user_id.is_some() {
            where_clause.push_str(" AND user_id = ?");
        }
        if filter.template_id.is_some() {
            where_clause.push_str(" AND template_id = ?");
        }
        if filter.event_id.is_some() {
            where_clause.push_str(" AND event_id = ?");
        }
        if filter.status.is_some() {
            where_clause.push_str(" AND status = ?");
        }

        let count_sql = format!("SELECT COUNT(*) FROM email_logs{where_clause}");
        // rowid breaks ties between rows created within the same second.
        let select_sql = format!(
            "SELECT * FROM email_logs{where_clause} ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?"
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, SqliteEmailLog>(&select_sql);

        if let Some(user_id) = &filter.user_id {
            count_query = count_query.bind(user_id);
            select_query = select_query.bind(user_id);
        }
        if let Some(template_id) = &filter.template_id {
            count_query = count_query.bind(template_id);
            select_query = select_query.bind(template_id);
        }
        if let Some(event_id) = &filter.event_id {
            count_query = count_query.bind(event_id);
            select_query = select_query.bind(event_id);
        }
        if let Some(status) = filter.status {
            count_query = count_query.bind(status.as_str());
            select_query = select_query.bind(status.as_str());
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let rows = select_query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        let items = rows
            .into_iter()
            .map(SqliteEmailLog::into_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EmailLogPage {
            items,
            total: total as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::setup_storage;
    use serde_json::Value;
    use ufund_mailer::{
        EmailLogFilter, EmailLogId, EmailLogStore, EmailStatus, NewEmailLog, TemplateVars,
    };

    fn vars(pairs: &[(&str, &str)]) -> TemplateVars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[tokio::test]
    async fn test_create_pending_and_get() {
        let storage = setup_storage().await;

        let new_log = NewEmailLog::new("a@x.com", "WELCOME")
            .with_cc(vec!["b@x.com".to_string(), "c@x.com".to_string()])
            .with_variables(vars(&[("firstName", "Ann")]))
            .with_user_id("usr_1")
            .with_event_id("evt_1");
        let id = new_log.id.clone();

        let entry = storage.create_pending(new_log).await.unwrap();
        assert_eq!(entry.id, id);
        assert_eq!(entry.status, EmailStatus::Pending);
        assert_eq!(entry.cc, "b@x.com,c@x.com");
        assert_eq!(entry.bcc, "");
        assert!(entry.provider_message_id.is_none());
        assert!(entry.error_message.is_none());

        let fetched = storage.get(&id).await.unwrap().unwrap();
        assert_eq!(fetched.to, "a@x.com");
        assert_eq!(fetched.template_id, "WELCOME");
        assert_eq!(fetched.variables, vars(&[("firstName", "Ann")]));
        assert_eq!(fetched.user_id.as_deref(), Some("usr_1"));
        assert_eq!(fetched.event_id.as_deref(), Some("evt_1"));
        assert_eq!(fetched.cc_list(), vec!["b@x.com", "c@x.com"]);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let storage = setup_storage().await;
        let result = storage.get(&EmailLogId::new("eml_missing")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_mark_sent() {
        let storage = setup_storage().await;

        let entry = storage
            .create_pending(NewEmailLog::new("a@x.com", "WELCOME"))
            .await
            .unwrap();

        storage.mark_sent(&entry.id, "m1").await.unwrap();

        let updated = storage.get(&entry.id).await.unwrap().unwrap();
        assert_eq!(updated.status, EmailStatus::Sent);
        assert_eq!(updated.provider_message_id.as_deref(), Some("m1"));
        assert!(updated.error_message.is_none());
    }

    #[tokio::test]
    async fn test_mark_failed() {
        let storage = setup_storage().await;

        let entry = storage
            .create_pending(NewEmailLog::new("a@x.com", "WELCOME"))
            .await
            .unwrap();

        storage.mark_failed(&entry.id, "smtp down").await.unwrap();

        let updated = storage.get(&entry.id).await.unwrap().unwrap();
        assert_eq!(updated.status, EmailStatus::Failed);
        assert_eq!(updated.error_message.as_deref(), Some("smtp down"));
        assert!(updated.provider_message_id.is_none());
    }

    #[tokio::test]
    async fn test_mark_sent_missing_entry() {
        let storage = setup_storage().await;
        let err = storage
            .mark_sent(&EmailLogId::new("eml_missing"), "m1")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_pagination_newest_first() {
        let storage = setup_storage().await;

        for i in 1..=25 {
            storage
                .create_pending(
                    NewEmailLog::new("a@x.com", "WELCOME")
                        .with_user_id("u1")
                        .with_event_id(format!("evt_{i}")),
                )
                .await
                .unwrap();
        }

        let filter = EmailLogFilter {
            user_id: Some("u1".to_string()),
            ..Default::default()
        };

        let page = storage.list(&filter, 10, 10).await.unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.items.len(), 10);

        // Newest-first: offset 10 starts at the 15th insertion and walks back.
        assert_eq!(page.items[0].event_id.as_deref(), Some("evt_15"));
        assert_eq!(page.items[9].event_id.as_deref(), Some("evt_6"));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let storage = setup_storage().await;

        let first = storage
            .create_pending(NewEmailLog::new("a@x.com", "WELCOME").with_user_id("u1"))
            .await
            .unwrap();
        storage
            .create_pending(NewEmailLog::new("b@x.com", "PASSWORD_RESET").with_user_id("u1"))
            .await
            .unwrap();
        storage
            .create_pending(NewEmailLog::new("c@x.com", "WELCOME").with_user_id("u2"))
            .await
            .unwrap();

        storage.mark_sent(&first.id, "m1").await.unwrap();

        let by_template = storage
            .list(
                &EmailLogFilter {
                    template_id: Some("WELCOME".to_string()),
                    ..Default::default()
                },
                20,
                0,
            )
            .await
            .unwrap();
        assert_eq!(by_template.total, 2);

        let by_user_and_status = storage
            .list(
                &EmailLogFilter {
                    user_id: Some("u1".to_string()),
                    status: Some(EmailStatus::Sent),
                    ..Default::default()
                },
                20,
                0,
            )
            .await
            .unwrap();
        assert_eq!(by_user_and_status.total, 1);
        assert_eq!(by_user_and_status.items[0].id, first.id);

        let pending = storage
            .list(
                &EmailLogFilter {
                    status: Some(EmailStatus::Pending),
                    ..Default::default()
                },
                20,
                0,
            )
            .await
            .unwrap();
        assert_eq!(pending.total, 2);
    }
}
