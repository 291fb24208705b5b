//! Authentication value objects.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The token pair handed to a signed-in client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Short-lived JWT access token
    pub access_token: String,

    /// Opaque refresh token; stored server-side as a hash only
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Result of a password sign-in attempt
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Credentials accepted; session established
    Success(AuthTokens),

    /// Credentials accepted but the account requires a second factor;
    /// the caller drives the two-factor code exchange next
    TwoFactorRequired { user_id: Uuid },
}
