//! Session middleware and extractor for axum.
//!
//! ```text
//! Request → session_middleware → injects CurrentSession into extensions
//!                                         ↓
//!                                 Handler → OptionalSession reads it back
//! ```
//!
//! The token is read from the session cookie first, then from an
//! `Authorization: Bearer <token>` header. Unknown, expired or unresolvable
//! tokens leave the request anonymous; handlers decide whether that is an
//! error.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::adapters::http::state::KitAuthState;
use crate::domain::foundation::{AuthError, Session, SessionToken, Timestamp, User};
use crate::ports::AuthAdapter;

/// The resolved session of the current request.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session: Session,
    pub user: User,
}

/// Token presented with the request, if any.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<SessionToken> {
    let from_cookie = CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string());

    let raw = from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string)
    })?;

    SessionToken::new(raw).ok()
}

/// Look a token up and check it has not expired at `now`.
pub async fn resolve_session(
    adapter: &dyn AuthAdapter,
    token: &SessionToken,
    now: Timestamp,
) -> Result<CurrentSession, AuthError> {
    let (session, user) = adapter
        .get_session_and_user(token)
        .await
        .map_err(|e| AuthError::adapter_unavailable(e.message))?
        .ok_or(AuthError::InvalidToken)?;

    if !session.is_active_at(now) {
        return Err(AuthError::SessionExpired);
    }

    Ok(CurrentSession { session, user })
}

/// Resolves the request's session and injects `CurrentSession` on success.
pub async fn session_middleware(
    State(state): State<KitAuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = session_token(request.headers(), &state.session.cookie_name) {
        match resolve_session(state.adapter.as_ref(), &token, Timestamp::now()).await {
            Ok(current) => {
                tracing::debug!(user_id = %current.user.id, "Session resolved");
                request.extensions_mut().insert(current);
            }
            Err(e) if e.is_transient() => {
                tracing::error!("Session lookup failed: {}", e);
            }
            Err(e) => {
                tracing::debug!("Ignoring session token: {}", e);
            }
        }
    }

    next.run(request).await
}

/// Extractor for the optional session.
///
/// Never rejects; `None` means the request is anonymous.
#[derive(Debug, Clone)]
pub struct OptionalSession(pub Option<CurrentSession>);

impl<S> axum::extract::FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let current = parts.extensions.get::<CurrentSession>().cloned();
            Ok(OptionalSession(current))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAuthAdapter;
    use crate::domain::foundation::{DomainError, ErrorCode, UserId};
    use async_trait::async_trait;
    use axum::extract::FromRequestParts;
    use axum::http::HeaderValue;

    const COOKIE: &str = "kit-auth.session-token";

    async fn adapter_with_session(days: i64) -> (InMemoryAuthAdapter, SessionToken) {
        let adapter = InMemoryAuthAdapter::new();
        let user = User::new(UserId::new("user-1").unwrap(), "user@example.com", None);
        adapter.create_user(&user).await.unwrap();
        let token = SessionToken::generate();
        adapter
            .create_session(&Session::new(
                token.clone(),
                user.id,
                Timestamp::now().add_days(days).unwrap(),
            ))
            .await
            .unwrap();
        (adapter, token)
    }

    struct FailingAdapter;

    #[async_trait]
    impl AuthAdapter for FailingAdapter {
        async fn create_user(&self, _user: &User) -> Result<(), DomainError> {
            unimplemented!()
        }
        async fn get_user(&self, _id: &UserId) -> Result<Option<User>, DomainError> {
            unimplemented!()
        }
        async fn get_user_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
            unimplemented!()
        }
        async fn create_session(&self, _session: &Session) -> Result<(), DomainError> {
            unimplemented!()
        }
        async fn get_session_and_user(
            &self,
            _token: &SessionToken,
        ) -> Result<Option<(Session, User)>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "connection refused"))
        }
        async fn delete_session(&self, _token: &SessionToken) -> Result<(), DomainError> {
            unimplemented!()
        }
        async fn set_subscription(
            &self,
            _id: &UserId,
            _subscription_id: Option<String>,
        ) -> Result<User, DomainError> {
            unimplemented!()
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Token Extraction
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_static("theme=dark; kit-auth.session-token=abc123"),
        );
        assert_eq!(session_token(&headers, COOKIE).unwrap().as_str(), "abc123");
    }

    #[test]
    fn token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer xyz"));
        assert_eq!(session_token(&headers, COOKIE).unwrap().as_str(), "xyz");
    }

    #[test]
    fn cookie_wins_over_header() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("kit-auth.session-token=c"));
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer h"));
        assert_eq!(session_token(&headers, COOKIE).unwrap().as_str(), "c");
    }

    #[test]
    fn basic_auth_is_not_a_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(session_token(&headers, COOKIE).is_none());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Resolution
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn active_session_resolves() {
        let (adapter, token) = adapter_with_session(1).await;
        let current = resolve_session(&adapter, &token, Timestamp::now()).await.unwrap();
        assert_eq!(current.user.id.as_str(), "user-1");
    }

    #[tokio::test]
    async fn expired_session_is_rejected() {
        let (adapter, token) = adapter_with_session(-1).await;
        let err = resolve_session(&adapter, &token, Timestamp::now()).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let (adapter, _token) = adapter_with_session(1).await;
        let err = resolve_session(&adapter, &SessionToken::generate(), Timestamp::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn adapter_failure_is_transient() {
        let err = resolve_session(&FailingAdapter, &SessionToken::generate(), Timestamp::now())
            .await
            .unwrap_err();
        assert!(err.is_transient());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractor
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn optional_session_reads_extension() {
        let (adapter, token) = adapter_with_session(1).await;
        let current = resolve_session(&adapter, &token, Timestamp::now()).await.unwrap();

        let mut request = axum::http::Request::builder().uri("/").body(()).unwrap();
        request.extensions_mut().insert(current);
        let (mut parts, _) = request.into_parts();

        let OptionalSession(found) = OptionalSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn optional_session_is_none_when_absent() {
        let request = axum::http::Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let OptionalSession(found) = OptionalSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
