//! Transactional email pipeline for the UFUND crowdfunding platform.
//!
//! The pipeline is template registry -> variable resolver -> two-phase
//! renderer -> delivery log -> transport, tied together by
//! [`EmailService`]. Templates live in an in-source catalog mirrored into a
//! persisted store; every send attempt leaves a durable log entry that moves
//! `PENDING -> SENT` or `PENDING -> FAILED` exactly once and can later be
//! replayed via resend.
//!
//! Storage backends implement [`EmailLogStore`] and
//! [`templates::TemplateStore`]; see the `ufund-mailer-storage-sqlite`
//! crate for the SQLite implementation.

pub mod config;
pub mod email;
pub mod error;
pub mod id;
pub mod log;
pub mod mailer;
pub mod service;
pub mod templates;
pub mod transports;

pub use config::{BrandConfig, MailerConfig, TlsType, TransportConfig};
pub use email::{Email, EmailBuilder};
pub use error::{MailerError, StorageError};
pub use log::{
    DEFAULT_PAGE_SIZE, EmailLogEntry, EmailLogFilter, EmailLogId, EmailLogPage, EmailLogStore,
    EmailStatus, NewEmailLog,
};
pub use mailer::{DispatchReceipt, Mailer};
pub use service::{EmailPreview, EmailService, SendEmailOptions, SendOutcome};
pub use templates::{
    RenderedEmail, TemplateDefinition, TemplateRecord, TemplateRegistry, TemplateRenderer,
    TemplateStore, TemplateVariable, TemplateVars, VariableResolver, builtin_templates,
};
pub use transports::{FileTransport, SmtpTransport, TlsConfig};

pub mod prelude {
    pub use crate::{
        BrandConfig, DispatchReceipt, Email, EmailBuilder, EmailLogEntry, EmailLogFilter,
        EmailLogId, EmailLogPage, EmailLogStore, EmailPreview, EmailService, EmailStatus,
        FileTransport, Mailer, MailerConfig, MailerError, NewEmailLog, SendEmailOptions,
        SendOutcome, SmtpTransport, StorageError, TemplateDefinition, TemplateRecord,
        TemplateRegistry, TemplateRenderer, TemplateStore, TemplateVariable, TemplateVars,
        VariableResolver,
    };
}
