/// Server services
pub mod auth;
pub mod credentials;
pub mod password;

pub use auth::AuthService;
pub use credentials::{CredentialError, CredentialService};
pub use password::{CredentialEncoder, CredentialScheme};
