/// Credential encoding - turns a secret into its stored form and checks it again
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How newly registered secrets are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialScheme {
    /// Salted bcrypt hash
    #[default]
    Bcrypt,
    /// Plain base64 of the secret. Reversible and unsalted, equivalent to
    /// storing cleartext. Only for stores that must stay readable by older
    /// deployments.
    LegacyBase64,
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("credential task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Longest secret bcrypt hashes in full; it ignores everything past this
pub const MAX_BCRYPT_SECRET_BYTES: usize = 72;

/// Encodes secrets for storage and matches them against stored credentials
///
/// Matching looks at the stored credential rather than the configured
/// scheme, so rows written under either scheme keep verifying after the
/// configuration changes.
#[derive(Debug, Clone)]
pub struct CredentialEncoder {
    scheme: CredentialScheme,
    bcrypt_cost: u32,
}

impl CredentialEncoder {
    pub fn new(scheme: CredentialScheme, bcrypt_cost: u32) -> Self {
        Self {
            scheme,
            bcrypt_cost,
        }
    }

    /// Bcrypt encoder with the given cost
    pub fn bcrypt(cost: u32) -> Self {
        Self::new(CredentialScheme::Bcrypt, cost)
    }

    /// Encoder that reproduces the legacy base64 format
    pub fn legacy() -> Self {
        Self::new(CredentialScheme::LegacyBase64, bcrypt::DEFAULT_COST)
    }

    pub fn scheme(&self) -> CredentialScheme {
        self.scheme
    }

    /// Whether `secret` can be stored without losing any of it
    pub fn accepts(&self, secret: &str) -> bool {
        match self.scheme {
            CredentialScheme::Bcrypt => secret.len() <= MAX_BCRYPT_SECRET_BYTES,
            CredentialScheme::LegacyBase64 => true,
        }
    }

    /// Encode a secret for storage
    pub async fn encode(&self, secret: &str) -> Result<String, EncodingError> {
        match self.scheme {
            CredentialScheme::Bcrypt => {
                let secret = secret.to_owned();
                let cost = self.bcrypt_cost;
                // Keep bcrypt off the async workers
                let hash = tokio::task::spawn_blocking(move || bcrypt::hash(secret, cost)).await??;
                Ok(hash)
            }
            CredentialScheme::LegacyBase64 => Ok(encode_legacy(secret)),
        }
    }

    /// Check a secret against a stored credential
    pub async fn matches(&self, secret: &str, stored: &str) -> Result<bool, EncodingError> {
        if is_bcrypt_hash(stored) {
            // Never registered under bcrypt, and bcrypt would only compare a prefix
            if secret.len() > MAX_BCRYPT_SECRET_BYTES {
                return Ok(false);
            }
            let secret = secret.to_owned();
            let stored = stored.to_owned();
            let valid = tokio::task::spawn_blocking(move || bcrypt::verify(secret, &stored)).await??;
            Ok(valid)
        } else {
            Ok(constant_time_eq(
                encode_legacy(secret).as_bytes(),
                stored.as_bytes(),
            ))
        }
    }
}

/// Bcrypt hashes start with `$2`; `$` is outside the base64 alphabet
fn is_bcrypt_hash(stored: &str) -> bool {
    stored.starts_with("$2")
}

fn encode_legacy(secret: &str) -> String {
    STANDARD.encode(secret.as_bytes())
}

/// Compare SHA-256 digests of both inputs in constant time, so neither the
/// content nor the length of the stored value leaks through timing.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use sha2::{Digest, Sha256};
    use subtle::ConstantTimeEq;

    let hash_a = Sha256::digest(a);
    let hash_b = Sha256::digest(b);
    hash_a.ct_eq(&hash_b).into()
}
