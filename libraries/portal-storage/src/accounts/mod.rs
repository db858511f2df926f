//! Account creation and lookup queries

use crate::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use portal_core::types::{Account, NewAccount, PublicAccount};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Insert a new account
///
/// A single `INSERT ... RETURNING` statement: the `UNIQUE` constraint on
/// `email` decides duplicates, and the row is committed before this returns.
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `account` - Name, email and already-encoded credential
///
/// # Errors
///
/// `StorageError::DuplicateEmail` when the email is taken
pub async fn create(pool: &SqlitePool, account: NewAccount) -> Result<Account> {
    let now = Utc::now().timestamp();

    let row = sqlx::query(
        "INSERT INTO accounts (name, email, credential, created_at)
         VALUES (?, ?, ?, ?)
         RETURNING id, created_at",
    )
    .bind(&account.name)
    .bind(&account.email)
    .bind(&account.credential)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| StorageError::from_insert(e, &account.email))?;

    Ok(Account {
        id: row.try_get("id")?,
        name: account.name,
        email: account.email,
        credential: account.credential,
        created_at: timestamp(row.try_get("created_at")?)?,
    })
}

/// Find an account by exact email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Account>> {
    let row = sqlx::query(
        "SELECT id, name, email, credential, created_at FROM accounts WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(account_from_row).transpose()
}

/// Get all accounts without credentials, oldest first
pub async fn list_public(pool: &SqlitePool) -> Result<Vec<PublicAccount>> {
    let rows = sqlx::query("SELECT id, name, email FROM accounts ORDER BY id ASC")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| {
            Ok(PublicAccount {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                email: row.try_get("email")?,
            })
        })
        .collect()
}

fn account_from_row(row: &SqliteRow) -> Result<Account> {
    Ok(Account {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        credential: row.try_get("credential")?,
        created_at: timestamp(row.try_get("created_at")?)?,
    })
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StorageError::CorruptRow(format!("invalid created_at: {secs}")))
}
