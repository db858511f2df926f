/// Credential service - registration and verification over an account store
use crate::services::password::{CredentialEncoder, MAX_BCRYPT_SECRET_BYTES};
use portal_core::{AccountStore, NewAccount, PublicAccount};
use std::{fmt::Display, sync::Arc};
use thiserror::Error;

pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

/// Domain-level outcome of a failed registration or verification
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Missing or malformed input; the caller can fix the request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Secret longer than the configured encoding can hold in full
    #[error("Password must be at most {max} bytes")]
    SecretTooLong { max: usize },

    #[error("Email already exists")]
    EmailAlreadyExists,

    /// Unknown email or wrong secret; callers cannot tell which
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Storage or unexpected fault. Already logged; the detail must not
    /// reach external callers.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Registration and verification over an [`AccountStore`]
///
/// The store is injected, so a test double can stand in for `SQLite`.
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn AccountStore>,
    encoder: CredentialEncoder,
}

impl CredentialService {
    pub fn new(store: Arc<dyn AccountStore>, encoder: CredentialEncoder) -> Self {
        Self { store, encoder }
    }

    /// Create an account and return its public fields
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        secret: &str,
    ) -> CredentialResult<PublicAccount> {
        require_text("name", name)?;
        require_text("email", email)?;
        require_secret(secret)?;
        if !self.encoder.accepts(secret) {
            return Err(CredentialError::SecretTooLong {
                max: MAX_BCRYPT_SECRET_BYTES,
            });
        }

        tracing::info!(email, "Registering account");

        let credential = self
            .encoder
            .encode(secret)
            .await
            .map_err(|e| internal("encoding credential", e))?;

        match self
            .store
            .create_account(NewAccount::new(name, email, credential))
            .await
        {
            Ok(account) => {
                tracing::info!(id = account.id, email, "Account registered");
                Ok(account.to_public())
            }
            Err(e) if e.is_duplicate_key() => {
                tracing::info!(email, "Registration rejected: email already exists");
                Err(CredentialError::EmailAlreadyExists)
            }
            Err(e) => Err(internal("creating account", e)),
        }
    }

    /// Check a secret against the account registered under `email`
    pub async fn verify(&self, email: &str, secret: &str) -> CredentialResult<PublicAccount> {
        require_text("email", email)?;
        require_secret(secret)?;

        tracing::debug!(email, "Verifying account");

        let Some(account) = self
            .store
            .find_by_email(email)
            .await
            .map_err(|e| internal("looking up account", e))?
        else {
            tracing::info!(email, "Verification failed: unknown email");
            return Err(CredentialError::InvalidCredentials);
        };

        let valid = self
            .encoder
            .matches(secret, &account.credential)
            .await
            .map_err(|e| internal("checking credential", e))?;

        if !valid {
            tracing::info!(email, "Verification failed: credential mismatch");
            return Err(CredentialError::InvalidCredentials);
        }

        tracing::info!(id = account.id, email, "Account verified");
        Ok(account.to_public())
    }

    /// Every account's public fields, oldest first
    ///
    /// Operator diagnostics only; callers must keep this away from
    /// untrusted clients.
    pub async fn list_accounts(&self) -> CredentialResult<Vec<PublicAccount>> {
        self.store
            .list_accounts()
            .await
            .map_err(|e| internal("listing accounts", e))
    }

    /// Whether the account store currently answers
    pub async fn is_ready(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Account store not ready: {}", e);
                false
            }
        }
    }
}

fn require_text(field: &str, value: &str) -> CredentialResult<()> {
    if value.trim().is_empty() {
        return Err(CredentialError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_secret(secret: &str) -> CredentialResult<()> {
    if secret.is_empty() {
        return Err(CredentialError::Validation("password is required".to_string()));
    }
    Ok(())
}

fn internal(action: &str, err: impl Display) -> CredentialError {
    tracing::error!("Credential service failed while {}: {}", action, err);
    CredentialError::Internal(format!("{action}: {err}"))
}
