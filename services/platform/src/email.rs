//! SMTP notification sender
//!
//! Optional collaborator: ticket redemption works without it, and when it
//! is wired in, failures are logged by the caller rather than propagated.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::{Error, Result};

/// Outbound email contract consumed by use cases
pub trait EmailSender: Send + Sync {
    /// Send an HTML email
    fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()>;
}

/// SMTP configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server address
    pub host: String,
    /// SMTP server port (usually 587 for STARTTLS)
    pub port: u16,
    /// SMTP authentication username
    pub username: String,
    /// SMTP authentication password
    pub password: String,
    /// Sender address used in the From header
    pub from_email: String,
}

impl SmtpConfig {
    /// Create a new SmtpConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SMTP_HOST`: SMTP server address
    /// - `SMTP_PORT`: SMTP server port (default: 587)
    /// - `SMTP_USERNAME`: SMTP authentication username
    /// - `SMTP_PASSWORD`: SMTP authentication password
    /// - `SMTP_FROM`: sender address (default: the username)
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("SMTP_HOST")
            .map_err(|_| Error::Email("SMTP_HOST environment variable not set".to_string()))?;

        let port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let username = std::env::var("SMTP_USERNAME")
            .map_err(|_| Error::Email("SMTP_USERNAME environment variable not set".to_string()))?;

        let password = std::env::var("SMTP_PASSWORD")
            .map_err(|_| Error::Email("SMTP_PASSWORD environment variable not set".to_string()))?;

        let from_email = std::env::var("SMTP_FROM").unwrap_or_else(|_| username.clone());

        Ok(Self {
            host,
            port,
            username,
            password,
            from_email,
        })
    }
}

/// SMTP email sender backed by lettre
#[derive(Clone)]
pub struct SmtpEmailSender {
    transport: SmtpTransport,
    from_email: String,
}

impl SmtpEmailSender {
    /// Create a new SMTP sender from configuration
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = SmtpTransport::starttls_relay(&config.host)
            .map_err(|e| Error::Email(e.to_string()))?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            from_email: config.from_email.clone(),
        })
    }
}

impl EmailSender for SmtpEmailSender {
    fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        let message = Message::builder()
            .from(
                self.from_email
                    .parse()
                    .map_err(|e| Error::Email(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| Error::Email(format!("Invalid recipient address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| Error::Email(e.to_string()))?;

        self.transport
            .send(&message)
            .map_err(|e| Error::Email(e.to_string()))?;

        Ok(())
    }
}
