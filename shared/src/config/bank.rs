//! SlushBank gateway configuration

use serde::{Deserialize, Serialize};

/// Configuration for the external banking API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BankApiConfig {
    /// Base URL of the bank service
    pub base_url: String,

    /// PEM-encoded RSA public key used to encrypt card data and aliases
    /// before they leave the process
    pub public_key_pem: String,

    /// Timeout for gateway requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum retry attempts for idempotent gateway reads
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl BankApiConfig {
    /// Create configuration from environment variables
    ///
    /// `BANK_API_BASE_URL` and `BANK_PUBLIC_KEY_PEM` are required; the
    /// process must not start without a key to encrypt card data with.
    pub fn from_env() -> Result<Self, String> {
        let base_url = std::env::var("BANK_API_BASE_URL")
            .map_err(|_| "BANK_API_BASE_URL not set".to_string())?;
        let public_key_pem = std::env::var("BANK_PUBLIC_KEY_PEM")
            .map_err(|_| "BANK_PUBLIC_KEY_PEM not set".to_string())?;

        if public_key_pem.trim().is_empty() {
            return Err("BANK_PUBLIC_KEY_PEM is empty".to_string());
        }

        Ok(Self {
            base_url,
            public_key_pem,
            request_timeout_secs: std::env::var("BANK_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
            max_retries: std::env::var("BANK_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_retries),
            retry_delay_ms: std::env::var("BANK_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_retry_delay),
        })
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}
