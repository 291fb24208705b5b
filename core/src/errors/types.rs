//! Error type definitions for authentication, tokens and payments.
//!
//! Variants carry no presentation concerns; the API layer maps them to
//! HTTP status codes and stable error codes.

use thiserror::Error;

/// Authentication and account-management errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Verification code expired")]
    VerificationCodeExpired,

    #[error("Maximum verification attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("User not found")]
    UserNotFound,

    #[error("Email address already in use")]
    EmailAlreadyInUse,

    #[error("Username already in use")]
    UsernameAlreadyInUse,

    #[error("Old email doesn't match the current one")]
    EmailMismatch,

    #[error("Old username doesn't match the current one")]
    UsernameMismatch,

    #[error("Two-factor authentication is not enabled for this user")]
    TwoFactorNotEnabled,

    #[error("Two-factor authentication is already enabled for this user")]
    TwoFactorAlreadyEnabled,

    #[error("Two-factor authentication is required to complete sign-in")]
    TwoFactorRequired,

    #[error("Email delivery failure")]
    EmailServiceFailure,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Errors surfaced by the bank gateway and the payment flows around it
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Card validation failed")]
    CardVerificationFailed,

    #[error("Invalid card number or PIN")]
    InvalidCard,

    #[error("Not enough funds to complete the purchase")]
    InsufficientFunds,

    #[error("Bank gateway unavailable")]
    GatewayUnavailable,

    #[error("The bank rejected the refund")]
    RefundRejected,

    #[error("The bank returned no certificate for the transaction")]
    CertificateMissing,

    #[error("Payment method is deactivated")]
    PaymentMethodDeactivated,
}
