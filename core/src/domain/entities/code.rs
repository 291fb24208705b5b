//! Verification code entity for email-based flows.
//!
//! The same code machinery backs email confirmation, two-factor sign-in and
//! password resets; the purpose tag keeps the flows from accepting each
//! other's codes.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: i32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// What a verification code is good for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    EmailConfirmation,
    TwoFactor,
    PasswordReset,
}

impl CodePurpose {
    /// Cache-key segment for this purpose
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::EmailConfirmation => "email_confirmation",
            CodePurpose::TwoFactor => "two_factor",
            CodePurpose::PasswordReset => "password_reset",
        }
    }

    /// How long a code of this purpose stays valid. Confirmation links are
    /// clicked from an inbox and get a longer window than interactive codes.
    pub fn expiration_minutes(&self) -> i64 {
        match self {
            CodePurpose::EmailConfirmation => 30,
            CodePurpose::TwoFactor => 5,
            CodePurpose::PasswordReset => 5,
        }
    }
}

/// Reasons a code fails to verify
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("verification code has expired")]
    Expired,
    #[error("verification code has already been used")]
    AlreadyUsed,
    #[error("maximum verification attempts exceeded")]
    MaxAttempts,
    #[error("verification code does not match")]
    Mismatch { remaining: i32 },
}

/// A single-use 6-digit verification code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// The 6-digit code
    pub code: String,

    /// What this code may be used for
    pub purpose: CodePurpose,

    /// Number of verification attempts made
    pub attempts: i32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub is_used: bool,
}

impl VerificationCode {
    /// Creates a new code with the purpose's default expiration
    pub fn new(purpose: CodePurpose) -> Self {
        let now = Utc::now();
        Self {
            code: Self::generate_code(),
            purpose,
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(purpose.expiration_minutes()),
            is_used: false,
        }
    }

    /// Generates a random 6-digit code
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Seconds until the code expires, zero when already expired
    pub fn seconds_until_expiration(&self) -> u64 {
        let remaining = self.expires_at - Utc::now();
        remaining.num_seconds().max(0) as u64
    }

    /// Verifies an input against this code.
    ///
    /// Increments the attempt counter on mismatch and marks the code used on
    /// success. The mutated state must be persisted by the caller either way.
    pub fn verify(&mut self, input_code: &str) -> Result<(), CodeError> {
        if self.is_expired() {
            return Err(CodeError::Expired);
        }
        if self.is_used {
            return Err(CodeError::AlreadyUsed);
        }
        if self.attempts >= MAX_ATTEMPTS {
            return Err(CodeError::MaxAttempts);
        }

        self.attempts += 1;

        if self.code == input_code {
            self.is_used = true;
            Ok(())
        } else {
            Err(CodeError::Mismatch {
                remaining: (MAX_ATTEMPTS - self.attempts).max(0),
            })
        }
    }
}
