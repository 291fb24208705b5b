//! User entity representing a registered storefront user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name, unique across the site
    pub username: String,

    /// Email address, unique across the site
    pub email: String,

    /// Bcrypt hash of the user's password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the email address has been confirmed
    pub email_confirmed: bool,

    /// Whether email-based two-factor authentication is enabled
    pub two_factor_enabled: bool,

    /// Optional profile fields
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,

    /// Timestamp when the account was registered
    pub join_date: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new User with an unconfirmed email and two-factor disabled
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            email_confirmed: false,
            two_factor_enabled: false,
            first_name: None,
            last_name: None,
            company_name: None,
            join_date: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Marks the email address as confirmed
    pub fn confirm_email(&mut self) {
        self.email_confirmed = true;
        self.updated_at = Utc::now();
    }

    /// Enables two-factor authentication
    pub fn enable_two_factor(&mut self) {
        self.two_factor_enabled = true;
        self.updated_at = Utc::now();
    }

    /// Disables two-factor authentication
    pub fn disable_two_factor(&mut self) {
        self.two_factor_enabled = false;
        self.updated_at = Utc::now();
    }

    /// Replaces the email address; the new address starts unconfirmed
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.email_confirmed = false;
        self.updated_at = Utc::now();
    }

    /// Replaces the username
    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Replaces the password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "slush_fan".to_string(),
            "fan@example.com".to_string(),
            "$2b$12$hash".to_string(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample_user();

        assert_eq!(user.username, "slush_fan");
        assert_eq!(user.email, "fan@example.com");
        assert!(!user.email_confirmed);
        assert!(!user.two_factor_enabled);
        assert!(user.last_login_at.is_none());
        assert!(user.first_name.is_none());
    }

    #[test]
    fn test_confirm_email() {
        let mut user = sample_user();
        user.confirm_email();
        assert!(user.email_confirmed);
    }

    #[test]
    fn test_two_factor_toggle() {
        let mut user = sample_user();

        user.enable_two_factor();
        assert!(user.two_factor_enabled);
        user.disable_two_factor();
        assert!(!user.two_factor_enabled);
    }

    #[test]
    fn test_set_email_resets_confirmation() {
        let mut user = sample_user();
        user.confirm_email();

        user.set_email("new@example.com".to_string());
        assert_eq!(user.email, "new@example.com");
        assert!(!user.email_confirmed);
    }

    #[test]
    fn test_record_login() {
        let mut user = sample_user();
        assert!(user.last_login_at.is_none());
        user.record_login();
        assert!(user.last_login_at.is_some());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = sample_user();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$12$hash"));
    }
}
