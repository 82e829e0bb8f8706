use crate::{MailerError, templates::TemplateVars};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};

/// A fully resolved subject and HTML document. Produced fresh on every
/// preview/send call; never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Two-phase template compiler.
///
/// Phase one compiles the template body against the merged variables; phase
/// two injects the result as `content` into the master layout so every email
/// carries the same chrome without the template author duplicating it. When
/// no layout is configured the inner HTML is the final document.
///
/// Placeholders are `{{name}}` (whitespace inside the braces is tolerated).
/// Unresolved placeholders render as empty strings, never as errors and
/// never as literal `{{name}}` text.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    layout: Option<String>,
}

impl TemplateRenderer {
    /// Renderer wrapping bodies in the shared master layout.
    pub fn new() -> Self {
        Self::with_layout(Some(super::MASTER_LAYOUT.to_string()))
    }

    /// Renderer with a caller-provided layout, or none at all.
    pub fn with_layout(layout: Option<String>) -> Self {
        Self {
            handlebars: Handlebars::new(),
            layout,
        }
    }

    /// Compile one template string against a variable map. Stateless.
    pub fn compile(&self, template: &str, vars: &TemplateVars) -> Result<String, MailerError> {
        Ok(self.handlebars.render_template(template, vars)?)
    }

    /// Render subject and HTML for one email.
    pub fn render(
        &self,
        subject: &str,
        html_body: &str,
        vars: &TemplateVars,
    ) -> Result<RenderedEmail, MailerError> {
        let inner_html = self.compile(html_body, vars)?;

        let html = match &self.layout {
            Some(layout) => {
                let mut layout_vars = vars.clone();
                layout_vars.insert(
                    "content".to_string(),
                    serde_json::Value::String(inner_html),
                );
                self.compile(layout, &layout_vars)?
            }
            None => inner_html,
        };

        let subject = self.compile(subject, vars)?;

        Ok(RenderedEmail { subject, html })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
