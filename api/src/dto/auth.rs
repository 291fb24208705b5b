//! Authentication DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ss_core::domain::value_objects::auth::AuthTokens;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Outcome of a login: either tokens, or a two-factor challenge carrying
/// the user id to continue with
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoginResponse {
    Success { tokens: AuthTokens },
    TwoFactorRequired { user_id: Uuid },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwoFactorSendRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TwoFactorVerifyRequest {
    pub user_id: Uuid,

    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConfirmEmailRequest {
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(equal = 6))]
    pub code: String,

    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
