use crate::{Email, MailerError};
use async_trait::async_trait;

/// Identifier handed back by a transport after a successful dispatch.
///
/// Opaque; used for delivery tracing in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    pub message_id: String,
}

/// Abstraction over the actual delivery transport.
///
/// Implementations make exactly one dispatch attempt per call and propagate
/// transport failures to the caller. Retry policy lives with the caller, not
/// here.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, email: Email) -> Result<DispatchReceipt, MailerError>;
}
