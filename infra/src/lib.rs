//! # Infrastructure Layer
//!
//! Concrete implementations of the seams `ss_core` defines:
//! - **Database**: MySQL repositories using SQLx
//! - **Cache**: Redis storage for verification codes
//! - **Email**: SMTP delivery via lettre
//! - **Bank**: HTTP client for the SlushBank gateway

pub mod bank;
pub mod cache;
pub mod database;
pub mod email;

pub use bank::SlushBankClient;
pub use cache::RedisCodeStore;
pub use database::create_pool;
pub use email::SmtpEmailSender;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email error: {0}")]
    Email(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
