//! Token service configuration.

/// Configuration for token issuance and validation
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC secret for signing access tokens
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    pub access_token_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_days: i64,

    /// Issuer claim on access tokens
    pub issuer: String,
}

impl TokenConfig {
    /// Create a config with default lifetimes around a secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_minutes: 15,
            refresh_token_days: 30,
            issuer: "slushstore".to_string(),
        }
    }

    /// Create from environment variables. `JWT_SECRET` is required.
    pub fn from_env() -> Result<Self, String> {
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET not set".to_string())?;
        if jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 bytes".to_string());
        }

        let mut config = Self::new(jwt_secret);
        if let Ok(minutes) = std::env::var("ACCESS_TOKEN_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                config.access_token_minutes = minutes;
            }
        }
        if let Ok(days) = std::env::var("REFRESH_TOKEN_DAYS") {
            if let Ok(days) = days.parse() {
                config.refresh_token_days = days;
            }
        }
        Ok(config)
    }
}
