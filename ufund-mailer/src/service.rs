//! Email orchestrator: ties registry, resolver, renderer, log store, and
//! transport together.
//!
//! Per send attempt the log entry moves `Pending -> Sent` or
//! `Pending -> Failed`, exactly once, with no backward transitions. The
//! provider call is awaited to completion; there is no internal timeout and
//! no retry. A resend replays a prior entry's recorded inputs as a fresh,
//! independent send.

use crate::{
    Email, EmailLogEntry, EmailLogFilter, EmailLogId, EmailLogPage, EmailLogStore, EmailStatus,
    Mailer, MailerConfig, MailerError, NewEmailLog,
    log::DEFAULT_PAGE_SIZE,
    templates::{
        TemplateRegistry, TemplateRenderer, TemplateStore, TemplateVars, VariableResolver,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Caller-facing input for one send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailOptions {
    pub to: String,
    #[serde(default)]
    pub cc: Vec<String>,
    #[serde(default)]
    pub bcc: Vec<String>,
    pub template_id: String,
    #[serde(default)]
    pub variables: TemplateVars,
    pub user_id: Option<String>,
    pub event_id: Option<String>,
}

impl SendEmailOptions {
    pub fn new(to: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            cc: Vec::new(),
            bcc: Vec::new(),
            template_id: template_id.into(),
            variables: TemplateVars::new(),
            user_id: None,
            event_id: None,
        }
    }

    pub fn with_variables(mut self, variables: TemplateVars) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_cc(mut self, cc: Vec<String>) -> Self {
        self.cc = cc;
        self
    }

    pub fn with_bcc(mut self, bcc: Vec<String>) -> Self {
        self.bcc = bcc;
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }
}

/// Result of a preview: rendered output, nothing dispatched, nothing logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailPreview {
    pub template_id: String,
    pub subject: String,
    pub html: String,
}

/// Result of a successful send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOutcome {
    pub id: EmailLogId,
    pub status: EmailStatus,
    pub provider_message_id: Option<String>,
}

pub struct EmailService {
    registry: TemplateRegistry,
    resolver: VariableResolver,
    renderer: TemplateRenderer,
    logs: Arc<dyn EmailLogStore>,
    transport: Box<dyn Mailer>,
    from_address: String,
}

impl EmailService {
    /// Build a service with the transport described by `config`.
    pub fn new(
        config: &MailerConfig,
        templates: Arc<dyn TemplateStore>,
        logs: Arc<dyn EmailLogStore>,
    ) -> Result<Self, MailerError> {
        let transport = config.build_transport()?;
        Ok(Self::with_transport(config, templates, logs, transport))
    }

    /// Build a service with an injected transport.
    pub fn with_transport(
        config: &MailerConfig,
        templates: Arc<dyn TemplateStore>,
        logs: Arc<dyn EmailLogStore>,
        transport: Box<dyn Mailer>,
    ) -> Self {
        Self {
            registry: TemplateRegistry::new(templates),
            resolver: VariableResolver::new(config.brand.clone()),
            renderer: TemplateRenderer::new(),
            logs,
            transport,
            from_address: config.get_from_address(),
        }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Seed the persisted template mirror from the built-in catalog.
    pub async fn sync_templates(&self) -> Result<usize, MailerError> {
        self.registry.sync_catalog().await
    }

    /// Explicit required-variable check. Not invoked by `send` or `preview`.
    pub fn validate(&self, template_id: &str, variables: &TemplateVars) -> Result<(), MailerError> {
        self.registry.validate(template_id, variables)
    }

    /// Render a template without sending or logging. Side-effect free.
    pub async fn preview(
        &self,
        template_id: &str,
        variables: &TemplateVars,
    ) -> Result<EmailPreview, MailerError> {
        let record = self.registry.lookup(template_id).await?;
        let merged = self.resolver.resolve(variables);
        let rendered = self.renderer.render(&record.subject, &record.html, &merged)?;

        Ok(EmailPreview {
            template_id: template_id.to_string(),
            subject: rendered.subject,
            html: rendered.html,
        })
    }

    /// Render, log, and dispatch one email.
    ///
    /// The log entry captures the caller-supplied variables verbatim (not
    /// the merged set); that record is what a later resend replays. On
    /// transport failure the entry is marked `Failed` and the original
    /// error is returned to the caller.
    pub async fn send(&self, options: SendEmailOptions) -> Result<SendOutcome, MailerError> {
        let record = self.registry.lookup(&options.template_id).await?;
        let merged = self.resolver.resolve(&options.variables);
        let rendered = self.renderer.render(&record.subject, &record.html, &merged)?;

        let email = Email::builder()
            .from(&self.from_address)
            .to(&options.to)
            .cc_multiple(options.cc.iter().cloned())
            .bcc_multiple(options.bcc.iter().cloned())
            .subject(rendered.subject)
            .html_body(rendered.html)
            .build()?;

        let entry = self
            .logs
            .create_pending(
                NewEmailLog {
                    id: EmailLogId::new_random(),
                    to: options.to.clone(),
                    cc: options.cc.clone(),
                    bcc: options.bcc.clone(),
                    template_id: options.template_id.clone(),
                    variables: options.variables.clone(),
                    user_id: options.user_id.clone(),
                    event_id: options.event_id.clone(),
                },
            )
            .await?;

        match self.transport.send_email(email).await {
            Ok(receipt) => {
                self.logs.mark_sent(&entry.id, &receipt.message_id).await?;

                tracing::info!(
                    log_id = %entry.id,
                    template_id = %options.template_id,
                    provider_message_id = %receipt.message_id,
                    "Email dispatched"
                );

                Ok(SendOutcome {
                    id: entry.id,
                    status: EmailStatus::Sent,
                    provider_message_id: Some(receipt.message_id),
                })
            }
            Err(err) => {
                self.logs.mark_failed(&entry.id, &err.to_string()).await?;

                tracing::error!(
                    log_id = %entry.id,
                    template_id = %options.template_id,
                    error = %err,
                    "Email dispatch failed"
                );

                Err(err)
            }
        }
    }

    /// Replay a prior log entry's recorded inputs as a new send attempt.
    ///
    /// The original entry is never mutated; the replay creates its own.
    pub async fn resend(&self, id: &EmailLogId) -> Result<SendOutcome, MailerError> {
        let entry = self
            .logs
            .get(id)
            .await?
            .ok_or_else(|| MailerError::LogNotFound { id: id.to_string() })?;

        let options = SendEmailOptions {
            to: entry.to.clone(),
            cc: entry.cc_list(),
            bcc: entry.bcc_list(),
            template_id: entry.template_id.clone(),
            variables: entry.variables.clone(),
            user_id: entry.user_id.clone(),
            event_id: entry.event_id.clone(),
        };

        self.send(options).await
    }

    /// Fetch one log entry.
    pub async fn get_log(&self, id: &EmailLogId) -> Result<EmailLogEntry, MailerError> {
        self.logs
            .get(id)
            .await?
            .ok_or_else(|| MailerError::LogNotFound { id: id.to_string() })
    }

    /// List log entries, newest first. Limit/offset default to 20/0.
    pub async fn list_logs(
        &self,
        filter: &EmailLogFilter,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<EmailLogPage, MailerError> {
        self.logs
            .list(
                filter,
                limit.unwrap_or(DEFAULT_PAGE_SIZE),
                offset.unwrap_or(0),
            )
            .await
    }
}
