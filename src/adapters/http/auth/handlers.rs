//! HTTP handlers for `/auth` endpoints.

use std::collections::BTreeMap;

use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::adapters::http::middleware::{session_token, OptionalSession};
use crate::adapters::http::state::KitAuthState;
use crate::application::SignOutCommand;

use super::dto::{ProviderResponse, SessionResponse};

/// GET /auth/providers - Configured providers keyed by id
pub async fn list_providers(State(state): State<KitAuthState>) -> impl IntoResponse {
    let providers: BTreeMap<String, ProviderResponse> = state
        .providers
        .iter()
        .map(|p| (p.id.clone(), ProviderResponse::from(p)))
        .collect();

    Json(providers)
}

/// GET /auth/session - Current user, or `{}` when anonymous
pub async fn get_session(OptionalSession(current): OptionalSession) -> impl IntoResponse {
    Json(SessionResponse::from(current))
}

/// POST /auth/signout - End the session and clear its cookie
///
/// Always redirects; a failed delete is logged and the cookie is still cleared.
pub async fn sign_out(
    State(state): State<KitAuthState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> impl IntoResponse {
    let cmd = SignOutCommand {
        token: session_token(&headers, &state.session.cookie_name),
    };

    if let Err(e) = state.sign_out_handler().handle(cmd).await {
        tracing::error!("Failed to delete session on sign out: {}", e);
    }

    let mut removal = Cookie::build((state.session.cookie_name.clone(), ""))
        .path("/")
        .build();
    removal.make_removal();

    (jar.add(removal), Redirect::to(&state.pages.sign_out))
}
