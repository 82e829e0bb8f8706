//! Template catalog, persisted mirror, and registry.
//!
//! The catalog is the in-source list of template definitions (subject
//! pattern, HTML body, declared variables). At startup it is seeded into a
//! persisted mirror keyed by template id; at runtime only the mirror is
//! read, and its `is_active` flag gates usability. The [`TemplateRegistry`]
//! is the single lookup gate both preview and send go through.

mod catalog;
mod engine;
mod layout;
mod variables;

pub use catalog::builtin_templates;
pub use engine::{RenderedEmail, TemplateRenderer};
pub use layout::MASTER_LAYOUT;
pub use variables::VariableResolver;

use crate::MailerError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Variable map passed to rendering. Keys are template placeholder names.
pub type TemplateVars = serde_json::Map<String, serde_json::Value>;

/// A variable a template declares, with its requiredness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl TemplateVariable {
    pub fn required(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
        }
    }

    pub fn optional(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: false,
        }
    }
}

/// A catalog entry: the in-source definition of one email template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub subject: String,
    pub html: String,
    pub source_file: String,
    pub variables: Vec<TemplateVariable>,
}

impl TemplateDefinition {
    /// Check that every required variable is present in `vars`.
    ///
    /// This is an explicit step; neither rendering nor sending invokes it.
    pub fn validate_variables(&self, vars: &TemplateVars) -> Result<(), MailerError> {
        for variable in self.variables.iter().filter(|v| v.required) {
            if !vars.contains_key(&variable.name) {
                return Err(MailerError::MissingVariable {
                    template_id: self.template_id.clone(),
                    variable: variable.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// The persisted mirror of a template definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub subject: String,
    pub html: String,
    pub source_file: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Persistence contract for the template mirror.
///
/// `upsert`/`set_active` are the storage primitives an administrative
/// surface builds on; the mail pipeline itself only reads.
#[async_trait]
pub trait TemplateStore: Send + Sync + 'static {
    async fn find_by_id(&self, template_id: &str) -> Result<Option<TemplateRecord>, MailerError>;

    async fn upsert(&self, definition: &TemplateDefinition) -> Result<TemplateRecord, MailerError>;

    async fn set_active(&self, template_id: &str, is_active: bool) -> Result<(), MailerError>;

    async fn all(&self) -> Result<Vec<TemplateRecord>, MailerError>;
}

/// Lookup gate over the persisted template mirror.
pub struct TemplateRegistry {
    store: Arc<dyn TemplateStore>,
    catalog: HashMap<String, TemplateDefinition>,
}

impl TemplateRegistry {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        let catalog = builtin_templates()
            .into_iter()
            .map(|definition| (definition.template_id.clone(), definition))
            .collect();

        Self { store, catalog }
    }

    /// The in-source definition for a template, if the catalog has one.
    pub fn definition(&self, template_id: &str) -> Option<&TemplateDefinition> {
        self.catalog.get(template_id)
    }

    /// Resolve a usable template record.
    ///
    /// Fails with `TemplateNotFound` when the mirror has no row for
    /// `template_id` or the row is inactive.
    pub async fn lookup(&self, template_id: &str) -> Result<TemplateRecord, MailerError> {
        let record = self.store.find_by_id(template_id).await?;

        match record {
            Some(record) if record.is_active => Ok(record),
            _ => Err(MailerError::TemplateNotFound {
                template_id: template_id.to_string(),
            }),
        }
    }

    pub async fn is_active(&self, template_id: &str) -> Result<bool, MailerError> {
        let record = self.store.find_by_id(template_id).await?;
        Ok(record.map(|r| r.is_active).unwrap_or(false))
    }

    /// Seed catalog entries that are not yet mirrored. Returns how many were
    /// inserted. Existing rows are left untouched so edits survive restarts.
    pub async fn sync_catalog(&self) -> Result<usize, MailerError> {
        let mut seeded = 0;

        for definition in self.catalog.values() {
            if self.store.find_by_id(&definition.template_id).await?.is_none() {
                self.store.upsert(definition).await?;
                seeded += 1;
            }
        }

        if seeded > 0 {
            tracing::info!(seeded, "Seeded email templates from catalog");
        }

        Ok(seeded)
    }

    /// Explicit required-variable check against the catalog declaration.
    pub fn validate(&self, template_id: &str, vars: &TemplateVars) -> Result<(), MailerError> {
        let definition =
            self.definition(template_id)
                .ok_or_else(|| MailerError::TemplateNotFound {
                    template_id: template_id.to_string(),
                })?;

        definition.validate_variables(vars)
    }
}
