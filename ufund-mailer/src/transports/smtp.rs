use crate::{DispatchReceipt, Email, Mailer, MailerError, id::generate_prefixed_id};
use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

/// SMTP delivery via lettre's async transport.
///
/// The message id is assigned locally at build time (SMTP itself returns no
/// stable identifier) and handed back as the dispatch receipt.
#[derive(Debug, Clone)]
pub struct SmtpTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    hostname: String,
}

impl SmtpTransport {
    pub fn new(transport: AsyncSmtpTransport<Tokio1Executor>, hostname: impl Into<String>) -> Self {
        Self {
            transport,
            hostname: hostname.into(),
        }
    }

    pub fn builder(hostname: &str) -> SmtpTransportBuilder {
        SmtpTransportBuilder::new(hostname)
    }
}

#[async_trait]
impl Mailer for SmtpTransport {
    async fn send_email(&self, email: Email) -> Result<DispatchReceipt, MailerError> {
        let message_id = format!("{}@{}", generate_prefixed_id("msg"), self.hostname);
        let message = super::build_message(email, Some(message_id.clone()))?;

        self.transport.send(message).await?;

        Ok(DispatchReceipt { message_id })
    }
}

pub struct SmtpTransportBuilder {
    hostname: String,
    port: Option<u16>,
    credentials: Option<Credentials>,
    tls: TlsConfig,
}

#[derive(Debug, Clone)]
pub enum TlsConfig {
    None,
    StartTls,
    Tls,
}

impl SmtpTransportBuilder {
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            port: None,
            credentials: None,
            tls: TlsConfig::StartTls,
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some(Credentials::new(username.to_string(), password.to_string()));
        self
    }

    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    pub fn no_tls(mut self) -> Self {
        self.tls = TlsConfig::None;
        self
    }

    pub fn starttls(mut self) -> Self {
        self.tls = TlsConfig::StartTls;
        self
    }

    pub fn build(self) -> Result<SmtpTransport, MailerError> {
        let mut builder = match self.tls {
            TlsConfig::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.hostname)
            }
            TlsConfig::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.hostname)?
            }
            TlsConfig::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&self.hostname)?,
        };

        if let Some(port) = self.port {
            builder = builder.port(port);
        }

        if let Some(credentials) = self.credentials {
            builder = builder.credentials(credentials);
        }

        Ok(SmtpTransport::new(builder.build(), self.hostname))
    }
}
