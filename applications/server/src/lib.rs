//! Portal Server Library
//!
//! Account registration and login over HTTP, backed by a single `SQLite`
//! accounts table, plus the static pages of the web front end.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use routes::create_router;
pub use services::{
    AuthService, CredentialEncoder, CredentialError, CredentialScheme, CredentialService,
};
pub use state::AppState;
