//! Verification code issue/verify flow.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::code::{CodeError, CodePurpose, VerificationCode};
use crate::errors::{AuthError, DomainError, DomainResult};

use super::traits::{CodeStore, EmailSender};

/// Issues purpose-tagged codes over email and verifies them against the
/// code store.
pub struct VerificationService<E, C>
where
    E: EmailSender,
    C: CodeStore,
{
    email: Arc<E>,
    store: Arc<C>,
}

impl<E, C> VerificationService<E, C>
where
    E: EmailSender,
    C: CodeStore,
{
    pub fn new(email: Arc<E>, store: Arc<C>) -> Self {
        Self { email, store }
    }

    fn key(user_id: Uuid, purpose: CodePurpose) -> String {
        format!("code:{}:{}", purpose.as_str(), user_id)
    }

    fn subject(purpose: CodePurpose) -> &'static str {
        match purpose {
            CodePurpose::EmailConfirmation => "Account Confirmation",
            CodePurpose::TwoFactor => "Security Code",
            CodePurpose::PasswordReset => "Reset Password",
        }
    }

    fn body(purpose: CodePurpose, code: &str) -> String {
        match purpose {
            CodePurpose::EmailConfirmation => format!(
                "Thank you for signing up for the Slush Store!\n\
                 Please confirm your account with this code: {}",
                code
            ),
            CodePurpose::TwoFactor => format!("Your security code is: {}", code),
            CodePurpose::PasswordReset => format!(
                "Please reset your Slush Store password with this code: {}",
                code
            ),
        }
    }

    /// Generate a fresh code for a purpose, store it and email it.
    ///
    /// A new send replaces whatever code the user had for the same purpose.
    pub async fn send_code(
        &self,
        user_id: Uuid,
        email: &str,
        purpose: CodePurpose,
    ) -> DomainResult<()> {
        let code = VerificationCode::new(purpose);
        let ttl = code.seconds_until_expiration();

        self.store
            .put(&Self::key(user_id, purpose), &code, ttl)
            .await?;

        self.email
            .send_email(email, Self::subject(purpose), &Self::body(purpose, &code.code))
            .await
            .map_err(|e| {
                warn!("failed to deliver {} code: {}", purpose.as_str(), e);
                DomainError::Auth(AuthError::EmailServiceFailure)
            })?;

        info!("sent {} code to user {}", purpose.as_str(), user_id);
        Ok(())
    }

    /// Check a submitted code.
    ///
    /// Attempt counts survive across calls: a mismatch is written back to
    /// the store, and a success consumes the code.
    pub async fn verify_code(
        &self,
        user_id: Uuid,
        purpose: CodePurpose,
        input: &str,
    ) -> DomainResult<()> {
        let key = Self::key(user_id, purpose);

        let mut code = self
            .store
            .get(&key)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidVerificationCode))?;

        match code.verify(input) {
            Ok(()) => {
                self.store.remove(&key).await?;
                Ok(())
            }
            Err(CodeError::Expired) => {
                self.store.remove(&key).await?;
                Err(DomainError::Auth(AuthError::VerificationCodeExpired))
            }
            Err(CodeError::AlreadyUsed) => {
                self.store.remove(&key).await?;
                Err(DomainError::Auth(AuthError::InvalidVerificationCode))
            }
            Err(CodeError::MaxAttempts) => {
                self.store.remove(&key).await?;
                Err(DomainError::Auth(AuthError::MaxAttemptsExceeded))
            }
            Err(CodeError::Mismatch { remaining }) => {
                let ttl = code.seconds_until_expiration();
                self.store.put(&key, &code, ttl).await?;
                warn!(
                    "bad {} code for user {}, {} attempt(s) remaining",
                    purpose.as_str(),
                    user_id,
                    remaining
                );
                Err(DomainError::Auth(AuthError::InvalidVerificationCode))
            }
        }
    }
}
