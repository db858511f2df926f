//! Portal Storage
//!
//! `SQLite` persistence for Portal accounts.
//!
//! This crate owns the `accounts` table and implements
//! [`portal_core::AccountStore`] on top of a `sqlx` connection pool.
//!
//! # Architecture
//!
//! - **Single table**: one row per account, email is the unique key
//! - **Engine-enforced uniqueness**: duplicate emails are rejected by the
//!   `UNIQUE` constraint at insert time, never by a prior lookup
//! - **Vertical slice**: `accounts` owns its queries; `SqliteAccountStore`
//!   adapts them to the core trait
//!
//! # Example
//!
//! ```rust,no_run
//! use portal_core::{AccountStore, NewAccount};
//! use portal_storage::SqliteAccountStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Connect and make sure the schema exists
//! let store = SqliteAccountStore::open("sqlite://users.db").await?;
//!
//! let account = store
//!     .create_account(NewAccount::new("Alice", "alice@example.com", "<encoded>"))
//!     .await?;
//! assert_eq!(account.email, "alice@example.com");
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

pub mod accounts;

pub use context::SqliteAccountStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Safe to call on every start: applied migrations are skipped and the
/// schema itself is created with `IF NOT EXISTS`.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://users.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        // Writers queue on the database lock instead of failing fast
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}
