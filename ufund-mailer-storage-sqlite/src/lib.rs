//! SQLite storage backend for the ufund-mailer email pipeline.
//!
//! Implements [`EmailLogStore`](ufund_mailer::EmailLogStore) and
//! [`TemplateStore`](ufund_mailer::TemplateStore) on one pool, with
//! versioned migrations for the `email_logs` and `email_templates` tables.

pub mod logs;
pub mod migrations;
pub mod templates;

pub use logs::SqliteEmailLog;
pub use migrations::{SqliteMigration, SqliteMigrationManager, all_migrations};
pub use templates::SqliteEmailTemplate;

use sqlx::SqlitePool;
use ufund_mailer::{MailerError, StorageError};

pub struct SqliteMailStorage {
    pub(crate) pool: SqlitePool,
}

impl SqliteMailStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str) -> Result<Self, MailerError> {
        let pool = SqlitePool::connect(url)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply any pending schema migrations.
    pub async fn migrate(&self) -> Result<(), MailerError> {
        let manager = SqliteMigrationManager::new(self.pool.clone());

        manager.initialize().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to initialize migrations");
            MailerError::Storage(StorageError::Migration(
                "Failed to initialize migrations".to_string(),
            ))
        })?;

        manager.up(&all_migrations()).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            MailerError::Storage(StorageError::Migration(
                "Failed to run migrations".to_string(),
            ))
        })?;

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), MailerError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }
}
