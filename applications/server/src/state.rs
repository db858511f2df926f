/// Shared application state
use crate::services::{AuthService, CredentialService};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(credentials: Arc<CredentialService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            credentials,
            auth_service,
        }
    }
}
