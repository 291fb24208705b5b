//! RSA encryption of values sent to the bank.
//!
//! The bank publishes an RSA public key; card numbers, PINs and account
//! aliases are PKCS#1 v1.5 encrypted with it and base64-encoded before they
//! appear in any request, header or query string.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};
use tracing::debug;

use crate::errors::{DomainError, DomainResult};

/// Encrypts sensitive values with the bank's public key
pub struct CardCipher {
    public_key: RsaPublicKey,
}

impl CardCipher {
    /// Build a cipher from a PEM-encoded public key.
    ///
    /// Fails when the key is missing or unparsable; the service must not
    /// start without a usable key.
    pub fn new(public_key_pem: &str) -> DomainResult<Self> {
        if public_key_pem.trim().is_empty() {
            return Err(DomainError::Internal {
                message: "bank public key not set".to_string(),
            });
        }

        let public_key = RsaPublicKey::from_public_key_pem(public_key_pem).map_err(|e| {
            DomainError::Internal {
                message: format!("invalid bank public key: {}", e),
            }
        })?;

        Ok(Self { public_key })
    }

    /// Encrypt a value, returning base64 ciphertext
    pub fn encrypt(&self, value: &str) -> DomainResult<String> {
        let mut rng = rand::thread_rng();
        let ciphertext = self
            .public_key
            .encrypt(&mut rng, Pkcs1v15Encrypt, value.as_bytes())
            .map_err(|e| DomainError::Internal {
                message: format!("encryption failed: {}", e),
            })?;

        debug!("encrypted {}-byte value for bank", value.len());
        Ok(BASE64.encode(ciphertext))
    }
}

#[cfg(test)]
pub mod test_support {
    //! Shared cipher for service tests; key generation is slow, do it once.

    use std::sync::{Arc, OnceLock};

    use rsa::pkcs8::EncodePublicKey;
    use rsa::RsaPrivateKey;

    use super::CardCipher;

    static PUBLIC_KEY_PEM: OnceLock<String> = OnceLock::new();

    pub fn public_key_pem() -> &'static str {
        PUBLIC_KEY_PEM.get_or_init(|| {
            let mut rng = rand::thread_rng();
            let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("generate test key");
            private_key
                .to_public_key()
                .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
                .expect("encode public key")
        })
    }

    pub fn test_cipher() -> Arc<CardCipher> {
        Arc::new(CardCipher::new(public_key_pem()).expect("test cipher"))
    }
}
