//! The request hook.
//!
//! `KitAuth` owns `/auth` and `/billing`. Requests under either mount are
//! answered by the hook's own router; everything else goes to the host
//! application, either through the `resolve` continuation passed to
//! [`KitAuth::handle`] or the inner service wrapped by [`KitAuth::layer`].
//!
//! # Example
//!
//! ```ignore
//! let kit = KitAuth::new(
//!     KitAuthOptions::new()
//!         .with_plans(plans)
//!         .with_providers(providers)
//!         .with_adapter(adapter)
//!         .with_billing(billing),
//! )?;
//!
//! let app = Router::new()
//!     .route("/", get(home))
//!     .fallback(not_found)
//!     .layer(kit.layer());
//! ```

use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::extract::Request;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::Router;
use axum_extra::extract::cookie::{Cookie, SameSite};
use futures::future::BoxFuture;
use tower::{Layer, Service, ServiceExt};

use crate::adapters::catalog::StaticPlanCatalog;
use crate::application::{KitAuthOptions, SetupError};
use crate::domain::foundation::{DomainError, Session, SessionToken, Timestamp, UserId};

use super::auth::auth_routes;
use super::billing::billing_routes;
use super::dto::not_found;
use super::middleware::session_middleware;
use super::mount::Mount;
use super::state::KitAuthState;

/// Authentication and billing hook.
#[derive(Clone)]
pub struct KitAuth {
    state: KitAuthState,
    router: Router,
}

impl KitAuth {
    /// Validate `options` and build the hook.
    pub fn new(options: KitAuthOptions) -> Result<Self, SetupError> {
        options.validate()?;

        let KitAuthOptions {
            plans,
            providers,
            adapter,
            billing,
            pages,
            session,
        } = options;

        let state = KitAuthState {
            adapter: adapter.ok_or(SetupError::MissingAdapter)?,
            billing: billing.ok_or(SetupError::MissingBilling)?,
            plans: Arc::new(StaticPlanCatalog::new(plans)),
            providers: providers.into(),
            pages: Arc::new(pages),
            session: Arc::new(session),
        };

        tracing::info!(
            plans = state.plans.list().len(),
            providers = state.providers.len(),
            "Kit auth hook ready"
        );

        Ok(Self {
            router: build_router(state.clone()),
            state,
        })
    }

    /// Whether a request to `path` is answered by the hook.
    pub fn owns(path: &str) -> bool {
        Mount::from_path(path).is_some()
    }

    /// Serve `request`, handing it to `resolve` when no mount matches.
    ///
    /// The response from `resolve` is returned untouched.
    pub async fn handle<F, Fut>(&self, request: Request, resolve: F) -> Response
    where
        F: FnOnce(Request) -> Fut,
        Fut: Future<Output = Response>,
    {
        if Self::owns(request.uri().path()) {
            self.dispatch(request).await
        } else {
            resolve(request).await
        }
    }

    /// Tower layer running the hook in front of another service.
    pub fn layer(&self) -> KitAuthLayer {
        KitAuthLayer { kit: self.clone() }
    }

    /// The hook's own router, for nesting or direct testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Issue a session for `user_id` lasting `session.max_age_days`.
    pub async fn create_session(&self, user_id: &UserId) -> Result<Session, DomainError> {
        let expires = Timestamp::now().add_days(self.state.session.max_age_days)?;
        let session = Session::new(SessionToken::generate(), user_id.clone(), expires);
        self.state.adapter.create_session(&session).await?;

        tracing::info!(user_id = %user_id, "Session created");
        Ok(session)
    }

    /// Cookie carrying `session`'s token.
    pub fn session_cookie(&self, session: &Session) -> Cookie<'static> {
        Cookie::build((
            self.state.session.cookie_name.clone(),
            session.token.as_str().to_string(),
        ))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(self.state.session.secure_cookie)
        .max_age(cookie::time::Duration::days(self.state.session.max_age_days))
        .build()
    }

    async fn dispatch(&self, request: Request) -> Response {
        tracing::debug!(path = %request.uri().path(), "Dispatching to kit auth");
        match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

fn build_router(state: KitAuthState) -> Router {
    Router::new()
        .nest(Mount::Auth.prefix(), auth_routes())
        .nest(Mount::Billing.prefix(), billing_routes())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state)
}

/// Tower layer for the hook
#[derive(Clone)]
pub struct KitAuthLayer {
    kit: KitAuth,
}

impl<S> Layer<S> for KitAuthLayer {
    type Service = KitAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        KitAuthService {
            inner,
            kit: self.kit.clone(),
        }
    }
}

/// Tower service for the hook
#[derive(Clone)]
pub struct KitAuthService<S> {
    inner: S,
    kit: KitAuth,
}

impl<S> Service<Request> for KitAuthService<S>
where
    S: Service<Request> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        if KitAuth::owns(req.uri().path()) {
            let kit = self.kit.clone();
            return Box::pin(async move { Ok(kit.dispatch(req).await) });
        }

        // The readied service must handle this call; leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move {
            let response = inner.call(req).await?;
            Ok(response.into_response())
        })
    }
}
