//! Portal Core
//!
//! Storage-agnostic domain types, the account store seam and its error type.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Account`, `NewAccount`, `PublicAccount`
//! - **Core Trait**: `AccountStore`, implemented by `portal-storage` and by test doubles
//! - **Error Handling**: `StoreError` and its `Result` alias
//!
//! # Example
//!
//! ```rust
//! use portal_core::types::{NewAccount, PublicAccount};
//!
//! let new_account = NewAccount::new("Alice", "alice@example.com", "<encoded>");
//! assert_eq!(new_account.email, "alice@example.com");
//!
//! let public = PublicAccount { id: 1, name: "Alice".into(), email: "alice@example.com".into() };
//! assert_eq!(public.id, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use store::AccountStore;
pub use types::{Account, AccountId, NewAccount, PublicAccount};
