use crate::transports::TlsConfig;
use crate::{FileTransport, Mailer, MailerError, SmtpTransport};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fixed brand identity injected into every rendered email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandConfig {
    pub app_name: String,
    pub web_url: String,
    pub dashboard_url: String,
    pub logo_url: String,
    pub support_email: String,
    pub legal_name: String,
    pub legal_address: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            app_name: "UFUND".to_string(),
            web_url: "https://ufund.io".to_string(),
            dashboard_url: "https://app.ufund.io/dashboard".to_string(),
            logo_url: "https://ufund.io/assets/logo.png".to_string(),
            support_email: "support@ufund.io".to_string(),
            legal_name: "UFUND Ltd".to_string(),
            legal_address: "1 Harbour Road, Valletta, Malta".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    pub transport: TransportConfig,
    pub from_address: String,
    pub from_name: Option<String>,
    pub brand: BrandConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportConfig {
    Smtp {
        host: String,
        port: Option<u16>,
        username: Option<String>,
        password: Option<String>,
        tls: Option<TlsType>,
    },
    File {
        output_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsType {
    None,
    StartTls,
    Tls,
}

impl From<TlsType> for TlsConfig {
    fn from(tls_type: TlsType) -> Self {
        match tls_type {
            TlsType::None => TlsConfig::None,
            TlsType::StartTls => TlsConfig::StartTls,
            TlsType::Tls => TlsConfig::Tls,
        }
    }
}

impl MailerConfig {
    pub fn from_env() -> Result<Self, MailerError> {
        let transport = if let Ok(smtp_host) = std::env::var("MAILER_SMTP_HOST") {
            TransportConfig::Smtp {
                host: smtp_host,
                port: std::env::var("MAILER_SMTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok()),
                username: std::env::var("MAILER_SMTP_USERNAME").ok(),
                password: std::env::var("MAILER_SMTP_PASSWORD").ok(),
                tls: std::env::var("MAILER_SMTP_TLS").ok().and_then(|t| {
                    match t.to_lowercase().as_str() {
                        "none" => Some(TlsType::None),
                        "starttls" => Some(TlsType::StartTls),
                        "tls" => Some(TlsType::Tls),
                        _ => None,
                    }
                }),
            }
        } else if let Ok(output_dir) = std::env::var("MAILER_FILE_OUTPUT_DIR") {
            TransportConfig::File {
                output_dir: PathBuf::from(output_dir),
            }
        } else {
            // Default to file transport for development
            TransportConfig::File {
                output_dir: PathBuf::from("./emails"),
            }
        };

        let defaults = BrandConfig::default();
        let brand = BrandConfig {
            app_name: std::env::var("MAILER_APP_NAME").unwrap_or(defaults.app_name),
            web_url: std::env::var("MAILER_WEB_URL").unwrap_or(defaults.web_url),
            dashboard_url: std::env::var("MAILER_DASHBOARD_URL").unwrap_or(defaults.dashboard_url),
            logo_url: std::env::var("MAILER_LOGO_URL").unwrap_or(defaults.logo_url),
            support_email: std::env::var("MAILER_SUPPORT_EMAIL").unwrap_or(defaults.support_email),
            legal_name: std::env::var("MAILER_LEGAL_NAME").unwrap_or(defaults.legal_name),
            legal_address: std::env::var("MAILER_LEGAL_ADDRESS").unwrap_or(defaults.legal_address),
        };

        Ok(Self {
            transport,
            from_address: std::env::var("MAILER_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@ufund.io".to_string()),
            from_name: std::env::var("MAILER_FROM_NAME").ok(),
            brand,
        })
    }

    pub fn build_transport(&self) -> Result<Box<dyn Mailer>, MailerError> {
        match &self.transport {
            TransportConfig::Smtp {
                host,
                port,
                username,
                password,
                tls,
            } => {
                let mut builder = SmtpTransport::builder(host);

                if let Some(port) = port {
                    builder = builder.port(*port);
                }

                if let (Some(username), Some(password)) = (username, password) {
                    builder = builder.credentials(username, password);
                }

                if let Some(tls) = tls {
                    builder = builder.tls(tls.clone().into());
                }

                Ok(Box::new(builder.build()?))
            }
            TransportConfig::File { output_dir } => Ok(Box::new(FileTransport::new(output_dir)?)),
        }
    }

    pub fn get_from_address(&self) -> String {
        if let Some(name) = &self.from_name {
            format!("{} <{}>", name, self.from_address)
        } else {
            self.from_address.clone()
        }
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::File {
                output_dir: PathBuf::from("./emails"),
            },
            from_address: "no-reply@ufund.io".to_string(),
            from_name: None,
            brand: BrandConfig::default(),
        }
    }
}
