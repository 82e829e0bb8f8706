use crate::MailerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fully rendered message ready for dispatch.
///
/// Subject and body are already resolved; transports only address and ship it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub from: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html_body: String,
    pub metadata: HashMap<String, String>,
}

impl Email {
    pub fn builder() -> EmailBuilder {
        EmailBuilder::default()
    }

    pub fn validate(&self) -> Result<(), MailerError> {
        if self.to.is_empty() {
            return Err(MailerError::Builder(
                "At least one recipient is required".to_string(),
            ));
        }

        if self.from.is_empty() {
            return Err(MailerError::Builder("From address is required".to_string()));
        }

        if self.subject.is_empty() {
            return Err(MailerError::Builder("Subject is required".to_string()));
        }

        if self.html_body.is_empty() {
            return Err(MailerError::Builder("HTML body is required".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct EmailBuilder {
    to: Vec<String>,
    cc: Vec<String>,
    bcc: Vec<String>,
    from: Option<String>,
    reply_to: Option<String>,
    subject: Option<String>,
    html_body: Option<String>,
    metadata: HashMap<String, String>,
}

impl EmailBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to<S: Into<String>>(mut self, email: S) -> Self {
        self.to.push(email.into());
        self
    }

    pub fn cc<S: Into<String>>(mut self, email: S) -> Self {
        self.cc.push(email.into());
        self
    }

    pub fn cc_multiple<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cc.extend(emails.into_iter().map(Into::into));
        self
    }

    pub fn bcc<S: Into<String>>(mut self, email: S) -> Self {
        self.bcc.push(email.into());
        self
    }

    pub fn bcc_multiple<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bcc.extend(emails.into_iter().map(Into::into));
        self
    }

    pub fn from<S: Into<String>>(mut self, email: S) -> Self {
        self.from = Some(email.into());
        self
    }

    pub fn reply_to<S: Into<String>>(mut self, email: S) -> Self {
        self.reply_to = Some(email.into());
        self
    }

    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn html_body<S: Into<String>>(mut self, html: S) -> Self {
        self.html_body = Some(html.into());
        self
    }

    pub fn metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<Email, MailerError> {
        let email = Email {
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            from: self
                .from
                .ok_or_else(|| MailerError::Builder("From address is required".to_string()))?,
            reply_to: self.reply_to,
            subject: self
                .subject
                .ok_or_else(|| MailerError::Builder("Subject is required".to_string()))?,
            html_body: self
                .html_body
                .ok_or_else(|| MailerError::Builder("HTML body is required".to_string()))?,
            metadata: self.metadata,
        };

        email.validate()?;
        Ok(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_builder() {
        let email = Email::builder()
            .from("no-reply@ufund.io")
            .to("investor@example.com")
            .cc("ops@ufund.io")
            .subject("Welcome to UFUND")
            .html_body("<p>Welcome</p>")
            .build()
            .unwrap();

        assert_eq!(email.from, "no-reply@ufund.io");
        assert_eq!(email.to, vec!["investor@example.com"]);
        assert_eq!(email.cc, vec!["ops@ufund.io"]);
        assert_eq!(email.subject, "Welcome to UFUND");
        assert_eq!(email.html_body, "<p>Welcome</p>");
    }

    #[test]
    fn test_email_requires_recipient() {
        let result = Email::builder()
            .from("no-reply@ufund.io")
            .subject("Welcome")
            .html_body("<p>Welcome</p>")
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_email_requires_body() {
        let result = Email::builder()
            .from("no-reply@ufund.io")
            .to("investor@example.com")
            .subject("Welcome")
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_cc_multiple() {
        let email = Email::builder()
            .from("no-reply@ufund.io")
            .to("a@example.com")
            .cc_multiple(vec!["b@example.com", "c@example.com"])
            .subject("Hi")
            .html_body("<p>Hi</p>")
            .build()
            .unwrap();

        assert_eq!(email.cc, vec!["b@example.com", "c@example.com"]);
    }
}
