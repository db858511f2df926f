/// Registration and login API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedAccount,
    services::CredentialError,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use portal_core::PublicAccount;
use serde::{Deserialize, Serialize};

const REGISTER_FIELDS_REQUIRED: &str = "All fields are required";
const LOGIN_FIELDS_REQUIRED: &str = "Email and password are required";

// Absent and null fields both arrive as None and are reported as missing
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: PublicAccount,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: PublicAccount,
    pub token: String,
    pub token_type: String,
}

/// Unreadable bodies (wrong content type, bad JSON, wrong field types) are
/// answered like a request with its fields missing
fn body_or_missing<T>(
    payload: std::result::Result<Json<T>, JsonRejection>,
    message: &str,
) -> Result<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ServerError::BadRequest(message.to_string())
    })
}

/// POST /api/register
pub async fn register(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let req = body_or_missing(payload, REGISTER_FIELDS_REQUIRED)?;

    let user = app_state
        .credentials
        .register(
            req.name.as_deref().unwrap_or_default(),
            req.email.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| match e {
            CredentialError::Validation(_) => {
                ServerError::BadRequest(REGISTER_FIELDS_REQUIRED.to_string())
            }
            e @ CredentialError::SecretTooLong { .. } => ServerError::BadRequest(e.to_string()),
            CredentialError::EmailAlreadyExists => {
                ServerError::BadRequest("Email already registered".to_string())
            }
            CredentialError::InvalidCredentials | CredentialError::Internal(_) => {
                ServerError::Internal("Registration failed".to_string())
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful".to_string(),
            user,
        }),
    ))
}

/// POST /api/login
pub async fn login(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let req = body_or_missing(payload, LOGIN_FIELDS_REQUIRED)?;

    let user = app_state
        .credentials
        .verify(
            req.email.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| match e {
            CredentialError::Validation(_) => {
                ServerError::BadRequest(LOGIN_FIELDS_REQUIRED.to_string())
            }
            CredentialError::InvalidCredentials => {
                ServerError::Auth("Invalid email or password".to_string())
            }
            CredentialError::EmailAlreadyExists
            | CredentialError::SecretTooLong { .. }
            | CredentialError::Internal(_) => ServerError::Internal("Login failed".to_string()),
        })?;

    let token = app_state
        .auth_service
        .create_access_token(&user)
        .map_err(|e| {
            tracing::error!("Failed to issue access token: {}", e);
            ServerError::Internal("Login failed".to_string())
        })?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user,
        token,
        token_type: "Bearer".to_string(),
    }))
}

/// GET /api/me
pub async fn me(auth: AuthenticatedAccount) -> Json<PublicAccount> {
    Json(auth.0)
}
