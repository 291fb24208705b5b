//! Auth service configuration.

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Bcrypt work factor for password hashing
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            min_password_length: 8,
        }
    }
}

impl AuthConfig {
    /// Low-cost hashing for tests
    pub fn for_tests() -> Self {
        Self {
            bcrypt_cost: 4,
            ..Default::default()
        }
    }
}
