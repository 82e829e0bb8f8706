//! Delivery log: the durable record of every send attempt.
//!
//! Each `send` creates one entry in `Pending` state before dispatch and
//! moves it exactly once to `Sent` or `Failed` afterwards. Entries are never
//! reverted or reused; a resend produces a brand-new entry.

use crate::{MailerError, id::generate_prefixed_id, templates::TemplateVars};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for log listings when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Outcome state of a single send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailStatus {
    Pending,
    Sent,
    Failed,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::Pending => "PENDING",
            EmailStatus::Sent => "SENT",
            EmailStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(EmailStatus::Pending),
            "SENT" => Some(EmailStatus::Sent),
            "FAILED" => Some(EmailStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unique, stable identifier for a delivery log entry.
/// Treat as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct EmailLogId(String);

impl EmailLogId {
    pub fn new(id: &str) -> Self {
        EmailLogId(id.to_string())
    }

    pub fn new_random() -> Self {
        EmailLogId(generate_prefixed_id("eml"))
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EmailLogId {
    fn default() -> Self {
        Self::new_random()
    }
}

impl From<String> for EmailLogId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EmailLogId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for EmailLogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input for creating a `Pending` log entry.
///
/// `variables` holds the caller-supplied map verbatim (not the merged set);
/// it is exactly what a later resend replays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmailLog {
    pub id: EmailLogId,
    pub to: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub template_id: String,
    pub variables: TemplateVars,
    pub user_id: Option<String>,
    pub event_id: Option<String>,
}

impl NewEmailLog {
    pub fn new(to: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            id: EmailLogId::new_random(),
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

/// One persisted send attempt and its outcome.
///
/// `cc`/`bcc` are stored as comma-joined strings (empty when absent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailLogEntry {
    pub id: EmailLogId,
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub template_id: String,
    pub variables: TemplateVars,
    pub status: EmailStatus,
    pub provider_message_id: Option<String>,
    pub error_message: Option<String>,
    pub user_id: Option<String>,
    pub event_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmailLogEntry {
    pub fn cc_list(&self) -> Vec<String> {
        split_address_list(&self.cc)
    }

    pub fn bcc_list(&self) -> Vec<String> {
        split_address_list(&self.bcc)
    }
}

pub(crate) fn split_address_list(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Filter for log listings. All fields are ANDed; `None` matches everything.
#[derive(Debug, Clone, Default)]
pub struct EmailLogFilter {
    pub user_id: Option<String>,
    pub template_id: Option<String>,
    pub event_id: Option<String>,
    pub status: Option<EmailStatus>,
}

/// One page of log entries, newest first, plus the total match count.
#[derive(Debug, Clone)]
pub struct EmailLogPage {
    pub items: Vec<EmailLogEntry>,
    pub total: u64,
}

/// Persistence contract for the delivery log.
///
/// `mark_sent`/`mark_failed` are single-call: the orchestrator invokes
/// exactly one of them, exactly once, per entry.
#[async_trait]
pub trait EmailLogStore: Send + Sync + 'static {
    /// Persist a new entry in `Pending` state.
    async fn create_pending(&self, new_log: NewEmailLog) -> Result<EmailLogEntry, MailerError>;

    /// Transition an entry to `Sent`, recording the provider message id.
    async fn mark_sent(
        &self,
        id: &EmailLogId,
        provider_message_id: &str,
    ) -> Result<(), MailerError>;

    /// Transition an entry to `Failed`, recording the error message.
    async fn mark_failed(&self, id: &EmailLogId, error_message: &str) -> Result<(), MailerError>;

    /// Fetch a single entry.
    async fn get(&self, id: &EmailLogId) -> Result<Option<EmailLogEntry>, MailerError>;

    /// List entries matching `filter`, newest first.
    async fn list(
        &self,
        filter: &EmailLogFilter,
        limit: u32,
        offset: u32,
    ) -> Result<EmailLogPage, MailerError>;
}
