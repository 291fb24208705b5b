//! Authentication service: registration, sign-in with optional email
//! two-factor, email confirmation, password and profile changes.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use ss_shared::utils::validation;

use crate::domain::entities::code::CodePurpose;
use crate::domain::entities::user::User;
use crate::domain::value_objects::auth::{AuthTokens, LoginOutcome};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;
use crate::services::verification::{CodeStore, EmailSender, VerificationService};

use super::config::AuthConfig;

/// Registration form data
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
}

/// Authentication service for the complete account lifecycle
pub struct AuthService<U, E, C, T>
where
    U: UserRepository,
    E: EmailSender,
    C: CodeStore,
    T: TokenRepository,
{
    /// User repository for database operations
    users: Arc<U>,
    /// Verification service for emailed codes
    verification: Arc<VerificationService<E, C>>,
    /// Token service for session management
    tokens: Arc<TokenService<T>>,
    /// Service configuration
    config: AuthConfig,
}

impl<U, E, C, T> AuthService<U, E, C, T>
where
    U: UserRepository,
    E: EmailSender,
    C: CodeStore,
    T: TokenRepository,
{
    pub fn new(
        users: Arc<U>,
        verification: Arc<VerificationService<E, C>>,
        tokens: Arc<TokenService<T>>,
        config: AuthConfig,
    ) -> Self {
        Self {
            users,
            verification,
            tokens,
            config,
        }
    }

    async fn require_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    fn hash_password(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
    }

    fn check_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| DomainError::internal(format!("password check failed: {}", e)))
    }

    fn validate_password(&self, password: &str) -> DomainResult<()> {
        if password.len() < self.config.min_password_length {
            return Err(DomainError::validation(format!(
                "the password must be at least {} characters",
                self.config.min_password_length
            )));
        }
        Ok(())
    }

    /// Register a new user.
    ///
    /// The user is signed in immediately with an unconfirmed email; a
    /// confirmation code is sent to the address on file.
    pub async fn register(&self, input: RegisterInput) -> DomainResult<AuthTokens> {
        if !validation::is_valid_username(&input.username) {
            return Err(DomainError::validation("please choose a valid username"));
        }
        if !validation::is_valid_email(&input.email) {
            return Err(DomainError::validation("please provide a valid email"));
        }
        self.validate_password(&input.password)?;

        if self.users.exists_by_email(&input.email).await? {
            return Err(DomainError::Auth(AuthError::EmailAlreadyInUse));
        }
        if self.users.exists_by_username(&input.username).await? {
            return Err(DomainError::Auth(AuthError::UsernameAlreadyInUse));
        }

        let password_hash = self.hash_password(&input.password)?;
        let mut user = User::new(input.username, input.email, password_hash);
        user.first_name = input.first_name;
        user.last_name = input.last_name;
        user.company_name = input.company_name;

        let user = self.users.create(user).await?;
        info!("registered user {} ({})", user.username, user.id);

        // Confirmation failure shouldn't lose the account that was just
        // created; the user can ask for a resend.
        if let Err(err) = self
            .verification
            .send_code(user.id, &user.email, CodePurpose::EmailConfirmation)
            .await
        {
            warn!("could not send confirmation email: {}", err);
        }

        self.tokens.issue_tokens(&user).await
    }

    /// Password sign-in. Accounts with two-factor enabled get a challenge
    /// instead of tokens.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginOutcome> {
        let mut user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!("login attempt for unknown user {}", username);
                return Err(DomainError::Auth(AuthError::InvalidCredentials));
            }
        };

        if !self.check_password(password, &user.password_hash)? {
            warn!("invalid password for user {}", username);
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }

        if user.two_factor_enabled {
            info!("user {} requires two-factor authentication", username);
            return Ok(LoginOutcome::TwoFactorRequired { user_id: user.id });
        }

        user.record_login();
        let user = self.users.update(user).await?;

        info!("user {} logged in", username);
        Ok(LoginOutcome::Success(self.tokens.issue_tokens(&user).await?))
    }

    /// Email the second-factor code for a pending two-factor sign-in
    pub async fn send_two_factor_code(&self, user_id: Uuid) -> DomainResult<()> {
        let user = self.require_user(user_id).await?;
        if !user.two_factor_enabled {
            return Err(DomainError::Auth(AuthError::TwoFactorNotEnabled));
        }

        self.verification
            .send_code(user.id, &user.email, CodePurpose::TwoFactor)
            .await
    }

    /// Complete a two-factor sign-in
    pub async fn verify_two_factor(&self, user_id: Uuid, code: &str) -> DomainResult<AuthTokens> {
        let mut user = self.require_user(user_id).await?;
        if !user.two_factor_enabled {
            return Err(DomainError::Auth(AuthError::TwoFactorNotEnabled));
        }

        self.verification
            .verify_code(user.id, CodePurpose::TwoFactor, code)
            .await?;

        user.record_login();
        let user = self.users.update(user).await?;
        self.tokens.issue_tokens(&user).await
    }

    /// Confirm the email address with an emailed code
    pub async fn confirm_email(&self, user_id: Uuid, code: &str) -> DomainResult<()> {
        let mut user = self.require_user(user_id).await?;

        self.verification
            .verify_code(user.id, CodePurpose::EmailConfirmation, code)
            .await?;

        user.confirm_email();
        self.users.update(user).await?;
        info!("email confirmed for user {}", user_id);
        Ok(())
    }

    /// Send a fresh confirmation code
    pub async fn resend_confirmation(&self, user_id: Uuid) -> DomainResult<()> {
        let user = self.require_user(user_id).await?;
        if user.email_confirmed {
            return Err(DomainError::BusinessRule {
                message: "the email address is already confirmed".to_string(),
            });
        }

        self.verification
            .send_code(user.id, &user.email, CodePurpose::EmailConfirmation)
            .await
    }

    /// Turn on email two-factor; a first code is sent right away
    pub async fn enable_two_factor(&self, user_id: Uuid) -> DomainResult<()> {
        let mut user = self.require_user(user_id).await?;
        if user.two_factor_enabled {
            return Err(DomainError::Auth(AuthError::TwoFactorAlreadyEnabled));
        }

        user.enable_two_factor();
        let user = self.users.update(user).await?;

        self.verification
            .send_code(user.id, &user.email, CodePurpose::TwoFactor)
            .await?;
        info!("two-factor enabled for user {}", user_id);
        Ok(())
    }

    /// Turn off email two-factor
    pub async fn disable_two_factor(&self, user_id: Uuid) -> DomainResult<()> {
        let mut user = self.require_user(user_id).await?;
        if !user.two_factor_enabled {
            return Err(DomainError::Auth(AuthError::TwoFactorNotEnabled));
        }

        user.disable_two_factor();
        self.users.update(user).await?;
        info!("two-factor disabled for user {}", user_id);
        Ok(())
    }

    /// Change the password, verifying the old one first
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let mut user = self.require_user(user_id).await?;

        if !self.check_password(old_password, &user.password_hash)? {
            return Err(DomainError::Auth(AuthError::InvalidCredentials));
        }
        self.validate_password(new_password)?;

        user.set_password_hash(self.hash_password(new_password)?);
        self.users.update(user).await?;
        info!("password changed for user {}", user_id);
        Ok(())
    }

    /// Change the email address; the old address must match the one on
    /// file (case-insensitive) and the new one starts unconfirmed
    pub async fn change_email(
        &self,
        user_id: Uuid,
        old_email: &str,
        new_email: &str,
    ) -> DomainResult<()> {
        let mut user = self.require_user(user_id).await?;

        if !user.email.eq_ignore_ascii_case(old_email) {
            return Err(DomainError::Auth(AuthError::EmailMismatch));
        }
        if !validation::is_valid_email(new_email) {
            return Err(DomainError::validation("please provide a valid email"));
        }
        if self.users.exists_by_email(new_email).await? {
            return Err(DomainError::Auth(AuthError::EmailAlreadyInUse));
        }

        user.set_email(new_email.to_string());
        let user = self.users.update(user).await?;

        if let Err(err) = self
            .verification
            .send_code(user.id, &user.email, CodePurpose::EmailConfirmation)
            .await
        {
            warn!("could not send confirmation to new address: {}", err);
        }
        Ok(())
    }

    /// Change the username; the old one must match the one on file
    pub async fn change_username(
        &self,
        user_id: Uuid,
        old_username: &str,
        new_username: &str,
    ) -> DomainResult<()> {
        let mut user = self.require_user(user_id).await?;

        if user.username != old_username {
            return Err(DomainError::Auth(AuthError::UsernameMismatch));
        }
        if !validation::is_valid_username(new_username) {
            return Err(DomainError::validation("please choose a valid username"));
        }
        if self.users.exists_by_username(new_username).await? {
            return Err(DomainError::Auth(AuthError::UsernameAlreadyInUse));
        }

        user.set_username(new_username.to_string());
        self.users.update(user).await?;
        Ok(())
    }

    /// Start a password reset.
    ///
    /// Always reports success; an unknown or unconfirmed address gets no
    /// email and no hint that it is unknown.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        match self.users.find_by_email(email).await? {
            Some(user) if user.email_confirmed => {
                self.verification
                    .send_code(user.id, &user.email, CodePurpose::PasswordReset)
                    .await?;
                info!("password reset email sent for user {}", user.id);
            }
            _ => {
                warn!("password reset requested for unknown or unconfirmed address");
            }
        }
        Ok(())
    }

    /// Finish a password reset with the emailed code
    pub async fn reset_password(
        &self,
        username: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let mut user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Auth(AuthError::InvalidVerificationCode))?;

        self.verification
            .verify_code(user.id, CodePurpose::PasswordReset, code)
            .await?;
        self.validate_password(new_password)?;

        user.set_password_hash(self.hash_password(new_password)?);
        let user_id = user.id;
        self.users.update(user).await?;

        // Old sessions don't survive a reset
        self.tokens.revoke_all(user_id).await?;
        info!("password reset completed for user {}", user_id);
        Ok(())
    }

    /// Rotate a refresh token into a fresh pair
    pub async fn refresh_tokens(&self, refresh_token: &str) -> DomainResult<AuthTokens> {
        let user_id = self.tokens.consume_refresh_token(refresh_token).await?;
        let user = self.require_user(user_id).await?;
        self.tokens.issue_tokens(&user).await
    }

    /// Revoke every session the user holds
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        self.tokens.revoke_all(user_id).await?;
        info!("user {} logged out", user_id);
        Ok(())
    }

    /// Load a user for display (manage page)
    pub async fn get_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.require_user(user_id).await
    }
}
