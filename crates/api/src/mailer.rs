//! Outbound transactional mail.
//!
//! Backed by lettre over SMTP. When no SMTP host is configured the mailer
//! degrades to logging the would-be message, which keeps local development
//! and tests free of mail infrastructure.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::error::AppError;

/// Transactional mail sender.
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    /// Build a mailer from optional SMTP configuration.
    ///
    /// # Panics
    ///
    /// Panics at startup on an unusable SMTP host, which is the desired
    /// fail-fast behaviour for misconfiguration.
    pub fn new(config: Option<&SmtpConfig>) -> Self {
        match config {
            Some(smtp) => {
                let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
                    .unwrap_or_else(|e| panic!("Invalid SMTP host '{}': {e}", smtp.host))
                    .credentials(Credentials::new(
                        smtp.username.clone(),
                        smtp.password.clone(),
                    ))
                    .build();
                Mailer {
                    transport: Some(transport),
                    from: smtp.from.clone(),
                }
            }
            None => Mailer {
                transport: None,
                from: "no-reply@warraq.local".to_string(),
            },
        }
    }

    /// Send a plain-text message.
    pub async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), AppError> {
        let Some(transport) = &self.transport else {
            tracing::info!(to, subject, "SMTP not configured, skipping outbound mail");
            return Ok(());
        };

        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AppError::InternalError(format!("Invalid sender address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::BadRequest(format!("Invalid recipient address: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::InternalError(format!("Failed to build message: {e}")))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to send mail: {e}")))?;
        Ok(())
    }

    /// Send the password-reset email with its one-time link.
    pub async fn send_password_reset(&self, to: &str, reset_url: &str) -> Result<(), AppError> {
        let body = format!(
            "A password reset was requested for your account.\n\n\
             Open this link to choose a new password (valid for one hour):\n{reset_url}\n\n\
             If you did not request this, you can ignore this message."
        );
        self.send(to, "Reset your password", body).await
    }
}
