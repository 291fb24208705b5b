//! Redis implementation of the CodeStore trait.
//!
//! Codes are stored as JSON with a server-side TTL, so abandoned codes
//! disappear without any sweeping on our side.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

use ss_core::domain::entities::code::VerificationCode;
use ss_core::errors::DomainError;
use ss_core::services::verification::CodeStore;
use ss_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Redis implementation of CodeStore
pub struct RedisCodeStore {
    connection: ConnectionManager,
    config: CacheConfig,
}

impl RedisCodeStore {
    /// Connect to Redis using the cache configuration
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection = ConnectionManager::new(client).await?;

        info!("redis code store connected");
        Ok(Self { connection, config })
    }

    fn redis_err(context: &str, err: redis::RedisError) -> DomainError {
        DomainError::Internal {
            message: format!("{}: {}", context, err),
        }
    }
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn put(
        &self,
        key: &str,
        code: &VerificationCode,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        let payload = serde_json::to_string(code)
            .map_err(|e| DomainError::internal(format!("code serialization failed: {}", e)))?;

        // A zero TTL would make SETEX error; clamp to one second
        let ttl = ttl_seconds.max(1);

        let mut connection = self.connection.clone();
        connection
            .set_ex::<_, _, ()>(self.config.make_key(key), payload, ttl)
            .await
            .map_err(|e| Self::redis_err("failed to store verification code", e))?;

        debug!("stored code under {} (ttl {}s)", key, ttl);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<VerificationCode>, DomainError> {
        let mut connection = self.connection.clone();
        let payload: Option<String> = connection
            .get(self.config.make_key(key))
            .await
            .map_err(|e| Self::redis_err("failed to read verification code", e))?;

        payload
            .map(|p| {
                serde_json::from_str(&p).map_err(|e| {
                    DomainError::internal(format!("code deserialization failed: {}", e))
                })
            })
            .transpose()
    }

    async fn remove(&self, key: &str) -> Result<(), DomainError> {
        let mut connection = self.connection.clone();
        connection
            .del::<_, ()>(self.config.make_key(key))
            .await
            .map_err(|e| Self::redis_err("failed to remove verification code", e))?;
        Ok(())
    }
}
