//! Shared utilities and common types for the SlushStore server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Pagination and response envelopes
//! - Validation helpers (card numbers, PINs, aliases, emails)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{BankApiConfig, CacheConfig, DatabaseConfig, EmailConfig, ServerConfig};
pub use types::{ApiResponse, PaginatedResponse, Pagination};
pub use utils::validation;
