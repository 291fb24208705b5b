//! In-memory mocks for the verification seams, shared by the auth tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::code::VerificationCode;
use crate::errors::{DomainError, DomainResult};
use crate::services::verification::{CodeStore, EmailSender};

/// Records outgoing mail; can be told to fail.
#[derive(Default)]
pub struct MockEmailSender {
    pub sent: Arc<RwLock<Vec<SentEmail>>>,
    fail: AtomicBool,
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// The last email sent, if any
    pub async fn last(&self) -> Option<SentEmail> {
        self.sent.read().await.last().cloned()
    }

    /// Extract the 6-digit code from the most recent email body
    pub async fn last_code(&self) -> Option<String> {
        let email = self.last().await?;
        email
            .body
            .split(|c: char| !c.is_ascii_digit())
            .find(|chunk| chunk.len() == 6)
            .map(|code| code.to_string())
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> DomainResult<()> {
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "smtp unavailable".to_string(),
            });
        }

        self.sent.write().await.push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// HashMap-backed code store. TTLs are recorded but not enforced; the code
/// entity carries its own expiry.
#[derive(Default)]
pub struct MockCodeStore {
    entries: Arc<RwLock<HashMap<String, VerificationCode>>>,
}

impl MockCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn peek(&self, key: &str) -> Option<VerificationCode> {
        self.entries.read().await.get(key).cloned()
    }
}

#[async_trait]
impl CodeStore for MockCodeStore {
    async fn put(
        &self,
        key: &str,
        code: &VerificationCode,
        _ttl_seconds: u64,
    ) -> DomainResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), code.clone());
        Ok(())
    }

    async fn get(&self, key: &str) -> DomainResult<Option<VerificationCode>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
