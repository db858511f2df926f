/// Bearer-token guard for account routes
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use portal_core::PublicAccount;
use std::sync::Arc;

const MISSING_TOKEN: &str = "Missing bearer token";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Account recovered from a valid access token, available to handlers
/// behind [`auth_middleware`]
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount(pub PublicAccount);

/// Token from an `Authorization: Bearer <token>` header
///
/// The scheme name is matched case-insensitively; an empty token counts as
/// no token at all.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Reject requests without a valid access token; on success the account is
/// attached to the request as [`AuthenticatedAccount`]
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ServerError::Auth(MISSING_TOKEN.to_string()))?;

    let account = auth_service.verify_access_token(token).map_err(|e| {
        tracing::warn!("Rejected access token: {}", e);
        ServerError::Auth(INVALID_TOKEN.to_string())
    })?;

    tracing::debug!(id = account.id, email = %account.email, "Request authenticated");
    request
        .extensions_mut()
        .insert(AuthenticatedAccount(account));

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAccount
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when the route sits behind auth_middleware
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .cloned()
            .ok_or_else(|| ServerError::Auth(MISSING_TOKEN.to_string()))
    }
}
