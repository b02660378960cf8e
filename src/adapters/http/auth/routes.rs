//! Axum router configuration for `/auth` endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::KitAuthState;

use super::handlers::{get_session, list_providers, sign_out};

/// Create the auth router, mounted at `/auth`.
///
/// # Routes
/// - `GET /providers` - Sign-in providers keyed by id
/// - `GET /session` - Current session or `{}`
/// - `POST /signout` - Delete the session and redirect (303)
pub fn auth_routes() -> Router<KitAuthState> {
    Router::new()
        .route("/providers", get(list_providers))
        .route("/session", get(get_session))
        .route("/signout", post(sign_out))
}
