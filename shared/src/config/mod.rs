//! Configuration module with business-specific sub-modules
//!
//! - `bank` - SlushBank gateway endpoint and encryption key
//! - `cache` - Redis configuration for verification codes
//! - `database` - Database connection and pool configuration
//! - `email` - SMTP delivery configuration
//! - `server` - HTTP server and CORS configuration

pub mod bank;
pub mod cache;
pub mod database;
pub mod email;
pub mod server;

pub use bank::BankApiConfig;
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use server::{CorsConfig, ServerConfig};
