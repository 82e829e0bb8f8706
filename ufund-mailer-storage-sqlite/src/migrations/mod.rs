//! Versioned schema migrations for the mail subsystem's two tables.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Database, Sqlite, SqlitePool};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait SqliteMigration: Send + Sync {
    /// Execute the migration
    async fn up<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError>;

    /// Rollback the migration
    async fn down<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError>;

    /// Unique version number for ordering migrations
    fn version(&self) -> i64;

    /// Human readable name of the migration
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: i64,
}

const MIGRATION_TABLE: &str = "_ufund_mailer_migrations";

pub struct SqliteMigrationManager {
    pool: SqlitePool,
}

impl SqliteMigrationManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn initialize(&self) -> Result<(), MigrationError> {
        sqlx::query(
            format!(
                r#"
            CREATE TABLE IF NOT EXISTS {MIGRATION_TABLE} (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at INTEGER NOT NULL DEFAULT (unixepoch())
            );"#
            )
            .as_str(),
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn up(&self, migrations: &[Box<dyn SqliteMigration>]) -> Result<(), MigrationError> {
        for migration in migrations {
            if !self.is_applied(migration.version()).await? {
                let mut tx = self.pool.begin().await?;

                tracing::info!(
                    "Applying migration {} ({})",
                    migration.name(),
                    migration.version()
                );

                migration
                    .up(&mut *tx as &mut <Sqlite as Database>::Connection)
                    .await?;

                sqlx::query(
                    format!(
                        "INSERT INTO {MIGRATION_TABLE} (version, name, applied_at) VALUES (?, ?, ?)"
                    )
                    .as_str(),
                )
                .bind(migration.version())
                .bind(migration.name())
                .bind(Utc::now().timestamp())
                .execute(&mut *tx)
                .await?;

                tx.commit().await?;
            }
        }
        Ok(())
    }

    pub async fn down(
        &self,
        migrations: &[Box<dyn SqliteMigration>],
    ) -> Result<(), MigrationError> {
        for migration in migrations {
            if self.is_applied(migration.version()).await? {
                let mut tx = self.pool.begin().await?;

                tracing::info!(
                    "Rolling back migration {} ({})",
                    migration.name(),
                    migration.version()
                );

                migration
                    .down(&mut *tx as &mut <Sqlite as Database>::Connection)
                    .await?;

                sqlx::query(
                    format!("DELETE FROM {MIGRATION_TABLE} WHERE version = ?").as_str(),
                )
                .bind(migration.version())
                .execute(&mut *tx)
                .await?;

                tx.commit().await?;
            }
        }
        Ok(())
    }

    pub async fn get_applied_migrations(&self) -> Result<Vec<MigrationRecord>, MigrationError> {
        let records = sqlx::query_as::<_, MigrationRecord>(
            format!("SELECT version, name, applied_at FROM {MIGRATION_TABLE}").as_str(),
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    pub async fn is_applied(&self, version: i64) -> Result<bool, MigrationError> {
        let result: bool = sqlx::query_scalar(
            format!("SELECT EXISTS(SELECT 1 FROM {MIGRATION_TABLE} WHERE version = ?)").as_str(),
        )
        .bind(version)
        .fetch_one(&self.pool)
        .await?;
        Ok(result)
    }
}

/// The full migration set, in order.
pub fn all_migrations() -> Vec<Box<dyn SqliteMigration>> {
    vec![
        Box::new(CreateEmailTemplatesTable),
        Box::new(CreateEmailLogsTable),
        Box::new(CreateEmailLogIndexes),
    ]
}

pub struct CreateEmailTemplatesTable;

#[async_trait]
impl SqliteMigration for CreateEmailTemplatesTable {
    fn version(&self) -> i64 {
        1
    }

    fn name(&self) -> &str {
        "CreateEmailTemplatesTable"
    }

    async fn up<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS email_templates (
                template_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                subject TEXT NOT NULL,
                html TEXT NOT NULL,
                source_file TEXT NOT NULL DEFAULT '',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL DEFAULT (unixepoch()),
                updated_at INTEGER NOT NULL DEFAULT (unixepoch())
            );"#,
        )
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn down<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query("DROP TABLE IF EXISTS email_templates")
            .execute(conn)
            .await?;
        Ok(())
    }
}

pub struct CreateEmailLogsTable;

#[async_trait]
impl SqliteMigration for CreateEmailLogsTable {
    fn version(&self) -> i64 {
        2
    }

    fn name(&self) -> &str {
        "CreateEmailLogsTable"
    }

    async fn up<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS email_logs (
                id TEXT PRIMARY KEY,
                to_address TEXT NOT NULL,
                cc TEXT NOT NULL DEFAULT '',
                bcc TEXT NOT NULL DEFAULT '',
                template_id TEXT NOT NULL,
                variables TEXT NOT NULL DEFAULT '{}',
                status TEXT NOT NULL DEFAULT 'PENDING',
                provider_message_id TEXT,
                error_message TEXT,
                user_id TEXT,
                event_id TEXT,
                created_at INTEGER NOT NULL DEFAULT (unixepoch()),
                updated_at INTEGER NOT NULL DEFAULT (unixepoch())
            );"#,
        )
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn down<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query("DROP TABLE IF EXISTS email_logs")
            .execute(conn)
            .await?;
        Ok(())
    }
}

pub struct CreateEmailLogIndexes;

#[async_trait]
impl SqliteMigration for CreateEmailLogIndexes {
    fn version(&self) -> i64 {
        3
    }

    fn name(&self) -> &str {
        "CreateEmailLogIndexes"
    }

    async fn up<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_email_logs_user_id ON email_logs(user_id)")
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_email_logs_template_id ON email_logs(template_id)",
        )
        .execute(&mut *conn)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_email_logs_event_id ON email_logs(event_id)")
            .execute(&mut *conn)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_email_logs_status ON email_logs(status)")
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_email_logs_created_at ON email_logs(created_at)",
        )
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn down<'a>(
        &'a self,
        conn: &'a mut <Sqlite as Database>::Connection,
    ) -> Result<(), MigrationError> {
        sqlx::query("DROP INDEX IF EXISTS idx_email_logs_user_id")
            .execute(&mut *conn)
            .await?;

        sqlx::query("DROP INDEX IF EXISTS idx_email_logs_template_id")
            .execute(&mut *conn)
            .await?;

        sqlx::query("DROP INDEX IF EXISTS idx_email_logs_event_id")
            .execute(&mut *conn)
            .await?;

        sqlx::query("DROP INDEX IF EXISTS idx_email_logs_status")
            .execute(&mut *conn)
            .await?;

        sqlx::query("DROP INDEX IF EXISTS idx_email_logs_created_at")
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
