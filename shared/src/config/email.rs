//! SMTP email delivery configuration

use serde::{Deserialize, Serialize};

/// Configuration for the SMTP relay used for confirmation links,
/// two-factor codes and password resets
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// SMTP host
    pub smtp_host: String,

    /// SMTP port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// From address on outgoing mail
    pub from_address: String,
}

impl EmailConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let smtp_host =
            std::env::var("SMTP_HOST").map_err(|_| "SMTP_HOST not set".to_string())?;
        let username =
            std::env::var("SMTP_USERNAME").map_err(|_| "SMTP_USERNAME not set".to_string())?;
        let password =
            std::env::var("SMTP_PASSWORD").map_err(|_| "SMTP_PASSWORD not set".to_string())?;
        let from_address =
            std::env::var("SMTP_FROM").map_err(|_| "SMTP_FROM not set".to_string())?;

        Ok(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_smtp_port),
            username,
            password,
            from_address,
        })
    }
}

fn default_smtp_port() -> u16 {
    587
}
