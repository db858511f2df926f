//! Account store trait

use crate::error::Result;
use crate::types::{Account, NewAccount, PublicAccount};
use async_trait::async_trait;

/// Persistent collection of accounts
///
/// Implementations own the account table exclusively. Email uniqueness must be
/// enforced atomically by the backing engine at insert time, never by a
/// lookup followed by an insert.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account, assigning a fresh id and creation timestamp
    ///
    /// The row is durable once this returns `Ok`.
    ///
    /// # Errors
    /// `StoreError::DuplicateKey` when the email is taken,
    /// `StoreError::StorageUnavailable` on any lower-level fault
    async fn create_account(&self, account: NewAccount) -> Result<Account>;

    /// Look up an account by exact, case-sensitive email
    ///
    /// # Errors
    /// `StoreError::StorageUnavailable` on any lower-level fault
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Enumerate every account in ascending id order, without credentials
    ///
    /// # Errors
    /// `StoreError::StorageUnavailable` on any lower-level fault
    async fn list_accounts(&self) -> Result<Vec<PublicAccount>>;

    /// Check that the backing storage is reachable
    ///
    /// # Errors
    /// `StoreError::StorageUnavailable` when it is not
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
