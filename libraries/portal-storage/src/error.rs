/// Storage-specific errors
use portal_core::StoreError;
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Email uniqueness constraint rejected an insert
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// Stored row could not be turned into a domain value
    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    /// Migration error
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Could not prepare the database file's directory
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Classify an insert failure, recognising unique-constraint violations
    pub fn from_insert(err: sqlx::Error, email: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::DuplicateEmail(email.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateEmail(email) => StoreError::duplicate_key(email),
            other => StoreError::unavailable(other.to_string()),
        }
    }
}
