/// Core error types for Portal
use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failure raised by an `AccountStore`
#[derive(Error, Debug)]
pub enum StoreError {
    /// An account with this email already exists
    #[error("Duplicate key: account with email {email} already exists")]
    DuplicateKey {
        /// The conflicting email
        email: String,
    },

    /// The backing storage could not complete the operation
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl StoreError {
    /// Create a duplicate key error
    pub fn duplicate_key(email: impl Into<String>) -> Self {
        Self::DuplicateKey {
            email: email.into(),
        }
    }

    /// Create a storage unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// Whether this error signals a uniqueness violation
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }
}
