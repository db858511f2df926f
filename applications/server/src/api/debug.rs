/// Account inspection routes (operator diagnostics)
///
/// Only mounted when `server.expose_debug_routes` is set.
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use portal_core::PublicAccount;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DebugUsersResponse {
    pub users: Vec<PublicAccount>,
}

/// GET /api/debug/users
pub async fn debug_users(State(app_state): State<AppState>) -> Result<Json<DebugUsersResponse>> {
    let users = app_state
        .credentials
        .list_accounts()
        .await
        .map_err(|_| ServerError::Internal("Failed to list users".to_string()))?;

    Ok(Json(DebugUsersResponse { users }))
}

/// GET /api/users
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Vec<PublicAccount>>> {
    let users = app_state
        .credentials
        .list_accounts()
        .await
        .map_err(|_| ServerError::Internal("Failed to fetch users".to_string()))?;

    Ok(Json(users))
}
