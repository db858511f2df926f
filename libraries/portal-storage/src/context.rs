use crate::{accounts, StorageError};
use async_trait::async_trait;
use portal_core::{
    error::Result,
    store::AccountStore,
    types::{Account, NewAccount, PublicAccount},
};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::str::FromStr;

/// Account store backed by `SQLite`
///
/// Constructed once at startup and shared by handle; the pool inside is the
/// process-wide storage connection.
#[derive(Clone)]
pub struct SqliteAccountStore {
    pool: SqlitePool,
}

impl SqliteAccountStore {
    /// Connect to `database_url` and ensure the schema exists
    ///
    /// # Errors
    /// Returns an error if the connection or the schema setup fails; the
    /// store is unusable in that case and callers should treat it as fatal
    pub async fn open(database_url: &str) -> std::result::Result<Self, StorageError> {
        ensure_parent_dir(database_url)?;
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        tracing::info!("Accounts table ready");
        Ok(Self { pool })
    }
}

/// SQLite creates the file on demand but not the directory holding it
fn ensure_parent_dir(database_url: &str) -> std::result::Result<(), StorageError> {
    let options = SqliteConnectOptions::from_str(database_url)?;
    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tracing::debug!(path = %parent.display(), "Creating database directory");
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        Ok(accounts::create(&self.pool, account).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        Ok(accounts::find_by_email(&self.pool, email).await?)
    }

    async fn list_accounts(&self) -> Result<Vec<PublicAccount>> {
        Ok(accounts::list_public(&self.pool).await?)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}
