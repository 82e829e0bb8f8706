use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Template not found or inactive: {template_id}")]
    TemplateNotFound { template_id: String },

    #[error("Email log entry not found: {id}")]
    LogNotFound { id: String },

    #[error("Missing required variable `{variable}` for template {template_id}")]
    MissingVariable {
        template_id: String,
        variable: String,
    },

    #[error("Email transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email message error: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("File transport error: {0}")]
    File(#[from] lettre::transport::file::Error),

    #[error("Template render error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Email builder error: {0}")]
    Builder(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Record not found")]
    NotFound,
}

impl MailerError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MailerError::TemplateNotFound { .. }
                | MailerError::LogNotFound { .. }
                | MailerError::Storage(StorageError::NotFound)
        )
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            MailerError::Transport(_)
                | MailerError::Address(_)
                | MailerError::Message(_)
                | MailerError::File(_)
        )
    }

    pub fn is_storage_error(&self) -> bool {
        matches!(self, MailerError::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, MailerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let not_found = MailerError::TemplateNotFound {
            template_id: "WELCOME".to_string(),
        };
        assert_eq!(
            not_found.to_string(),
            "Template not found or inactive: WELCOME"
        );

        let missing = MailerError::MissingVariable {
            template_id: "WELCOME".to_string(),
            variable: "firstName".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "Missing required variable `firstName` for template WELCOME"
        );

        let storage = MailerError::Storage(StorageError::Database("connection reset".to_string()));
        assert_eq!(
            storage.to_string(),
            "Storage error: Database error: connection reset"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(
            MailerError::TemplateNotFound {
                template_id: "X".to_string()
            }
            .is_not_found()
        );
        assert!(
            MailerError::LogNotFound {
                id: "eml_abc".to_string()
            }
            .is_not_found()
        );
        assert!(!MailerError::Builder("oops".to_string()).is_not_found());
    }

    #[test]
    fn test_is_storage_error() {
        assert!(MailerError::Storage(StorageError::NotFound).is_storage_error());
        assert!(!MailerError::Config("bad".to_string()).is_storage_error());
    }
}
