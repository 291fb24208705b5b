//! SMTP implementation of the EmailSender trait.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use ss_core::errors::DomainError;
use ss_core::services::verification::EmailSender;
use ss_shared::config::EmailConfig;

use super::mask_email;
use crate::InfrastructureError;

/// SMTP implementation of EmailSender
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpEmailSender {
    /// Build the SMTP transport from configuration
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Email(format!("invalid SMTP relay: {}", e)))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        info!("smtp transport ready for {}", config.smtp_host);
        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), DomainError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| DomainError::internal(format!("bad from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| DomainError::internal(format!("bad recipient address: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| DomainError::internal(format!("failed to build message: {}", e)))?;

        self.transport.send(message).await.map_err(|e| {
            error!("smtp delivery to {} failed: {}", mask_email(to), e);
            DomainError::internal(format!("smtp delivery failed: {}", e))
        })?;

        info!("sent \"{}\" to {}", subject, mask_email(to));
        Ok(())
    }
}
