//! Account domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned account identifier
pub type AccountId = i64;

/// A registered user's persisted record
///
/// Never serialized: the credential must not leave the server. Use
/// [`Account::to_public`] for anything sent to a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique, monotonically increasing identifier
    pub id: AccountId,

    /// Display name
    pub name: String,

    /// Case-sensitive unique key
    pub email: String,

    /// Encoded secret
    pub credential: String,

    /// Set once at creation
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Public projection of this account
    pub fn to_public(&self) -> PublicAccount {
        PublicAccount {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Data for creating a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Display name
    pub name: String,
    /// Unique key
    pub email: String,
    /// Secret, already encoded
    pub credential: String,
}

impl NewAccount {
    /// Create account data from an already-encoded credential
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            credential: credential.into(),
        }
    }
}

/// The fields of an account that may be shown to a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAccount {
    /// Account id
    pub id: AccountId,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

impl From<Account> for PublicAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}
