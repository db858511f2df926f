/// HTTP router assembly
use crate::{api, config::ServerSettings, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Build the full application router
///
/// API routes live under `/api`; the named pages and every other path are
/// served from `settings.web_dir`.
pub fn create_router(app_state: AppState, settings: &ServerSettings) -> Router {
    // Public routes (no auth required)
    let mut public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/register", post(api::accounts::register))
        .route("/login", post(api::accounts::login));

    if settings.expose_debug_routes {
        tracing::warn!("Account listing routes are exposed; do not serve them publicly");
        public_routes = public_routes
            .route("/debug/users", get(api::debug::debug_users))
            .route("/users", get(api::debug::list_users));
    }

    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        .route("/me", get(api::accounts::me))
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    let web_dir = &settings.web_dir;

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .route_service("/", ServeFile::new(web_dir.join("index.html")))
        .route_service("/signup", ServeFile::new(web_dir.join("signup.html")))
        .route_service("/dashboard", ServeFile::new(web_dir.join("dashboard.html")))
        .fallback_service(ServeDir::new(web_dir))
        // Headers stay out of spans: they carry bearer tokens
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
