//! Mapping from domain errors to HTTP responses.

use actix_web::HttpResponse;
use tracing::error;
use validator::ValidationErrors;

use ss_core::errors::{AuthError, DomainError, PaymentError, TokenError};
use ss_shared::types::ApiResponse;

/// Render a domain error as an HTTP response with a stable error code
pub fn to_response(err: &DomainError) -> HttpResponse {
    let (status, code, message) = match err {
        DomainError::Validation { message } => (400, "VALIDATION_ERROR", message.clone()),
        DomainError::BusinessRule { message } => {
            (400, "BUSINESS_RULE_VIOLATION", message.clone())
        }
        DomainError::NotFound { resource } => {
            (404, "NOT_FOUND", format!("{} not found", resource))
        }
        DomainError::Duplicate { resource } => {
            (409, "ALREADY_EXISTS", format!("{} already exists", resource))
        }
        DomainError::Unauthorized => (401, "UNAUTHORIZED", err.to_string()),
        DomainError::Forbidden => (403, "FORBIDDEN", err.to_string()),
        DomainError::Internal { message } => {
            // Internals stay in the log, not in the response body
            error!("internal error: {}", message);
            (500, "INTERNAL_ERROR", "an internal error occurred".to_string())
        }

        DomainError::Auth(auth) => {
            let (status, code) = match auth {
                AuthError::InvalidCredentials => (401, "INVALID_CREDENTIALS"),
                AuthError::InvalidVerificationCode => (400, "INVALID_VERIFICATION_CODE"),
                AuthError::VerificationCodeExpired => (400, "VERIFICATION_CODE_EXPIRED"),
                AuthError::MaxAttemptsExceeded => (429, "MAX_ATTEMPTS_EXCEEDED"),
                AuthError::UserNotFound => (404, "USER_NOT_FOUND"),
                AuthError::EmailAlreadyInUse => (409, "EMAIL_ALREADY_IN_USE"),
                AuthError::UsernameAlreadyInUse => (409, "USERNAME_ALREADY_IN_USE"),
                AuthError::EmailMismatch => (400, "EMAIL_MISMATCH"),
                AuthError::UsernameMismatch => (400, "USERNAME_MISMATCH"),
                AuthError::TwoFactorNotEnabled => (400, "TWO_FACTOR_NOT_ENABLED"),
                AuthError::TwoFactorAlreadyEnabled => (400, "TWO_FACTOR_ALREADY_ENABLED"),
                AuthError::TwoFactorRequired => (401, "TWO_FACTOR_REQUIRED"),
                AuthError::EmailServiceFailure => (503, "EMAIL_SERVICE_FAILURE"),
            };
            (status, code, auth.to_string())
        }

        DomainError::Token(token) => {
            let (status, code) = match token {
                TokenError::TokenGenerationFailed => (500, "TOKEN_GENERATION_FAILED"),
                TokenError::TokenExpired => (401, "TOKEN_EXPIRED"),
                TokenError::RefreshTokenExpired => (401, "REFRESH_TOKEN_EXPIRED"),
                TokenError::TokenRevoked => (401, "TOKEN_REVOKED"),
                _ => (401, "INVALID_TOKEN"),
            };
            (status, code, token.to_string())
        }

        DomainError::Payment(payment) => {
            let (status, code) = match payment {
                PaymentError::InvalidCard => (400, "INVALID_CARD"),
                PaymentError::PaymentMethodDeactivated => (400, "PAYMENT_METHOD_DEACTIVATED"),
                PaymentError::InsufficientFunds => (402, "INSUFFICIENT_FUNDS"),
                PaymentError::RefundRejected => (502, "REFUND_REJECTED"),
                PaymentError::CardVerificationFailed => (502, "CARD_VERIFICATION_FAILED"),
                PaymentError::GatewayUnavailable => (502, "GATEWAY_UNAVAILABLE"),
                PaymentError::CertificateMissing => (502, "CERTIFICATE_MISSING"),
            };
            (status, code, payment.to_string())
        }
    };

    HttpResponse::build(
        actix_web::http::StatusCode::from_u16(status).unwrap_or_else(|_| {
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        }),
    )
    .json(ApiResponse::<()>::error(code, message))
}

/// Render DTO validation failures as a 400 with field details
pub fn validation_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();

    HttpResponse::BadRequest().json(ApiResponse::<()>::error(
        "VALIDATION_ERROR",
        format!("invalid value for: {}", fields.join(", ")),
    ))
}
