use crate::{DispatchReceipt, Email, Mailer, MailerError};
use async_trait::async_trait;
use lettre::transport::file::FileTransport as LettreFileTransport;
use lettre::{Message, Transport};
use std::path::{Path, PathBuf};

/// Development transport writing each message to an `.eml` file.
///
/// The file id lettre generates doubles as the dispatch receipt.
#[derive(Debug, Clone)]
pub struct FileTransport {
    transport: LettreFileTransport,
    output_dir: PathBuf,
}

impl FileTransport {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self, MailerError> {
        let output_dir = output_dir.as_ref().to_path_buf();

        if !output_dir.exists() {
            std::fs::create_dir_all(&output_dir)?;
        }

        let transport = LettreFileTransport::new(&output_dir);

        Ok(Self {
            transport,
            output_dir,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

#[async_trait]
impl Mailer for FileTransport {
    async fn send_email(&self, email: Email) -> Result<DispatchReceipt, MailerError> {
        let message: Message = super::build_message(email, None)?;

        // lettre's FileTransport is sync, so we use spawn_blocking
        let transport = self.transport.clone();
        let message_id = tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| MailerError::Builder(format!("Failed to send email: {e}")))??;

        Ok(DispatchReceipt { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_transport() {
        let temp_dir = tempdir().unwrap();
        let transport = FileTransport::new(temp_dir.path()).unwrap();

        let email = Email {
            to: vec!["recipient@example.com".to_string()],
            cc: vec![],
            bcc: vec![],
            from: "no-reply@ufund.io".to_string(),
            reply_to: None,
            subject: "Test Subject".to_string(),
            html_body: "<h1>Hello</h1>".to_string(),
            metadata: HashMap::new(),
        };

        let receipt = transport.send_email(email).await.unwrap();
        assert!(!receipt.message_id.is_empty());

        // Check that a file was created
        let entries = std::fs::read_dir(temp_dir.path()).unwrap();
        assert!(entries.count() > 0);
    }
}
