//! Authentication types for the domain layer.
//!
//! These types are what a persistence adapter hands back when a session token
//! is resolved. They carry **no adapter dependencies**: the in-memory store and
//! the PostgreSQL adapter both populate the same structs.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after resolving the session cookie:
//! if let Some((session, user)) = adapter.get_session_and_user(&token).await? {
//!     if session.is_active_at(Timestamp::now()) {
//!         request.extensions_mut().insert(user);
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{SessionToken, Timestamp, UserId};

/// A user known to the persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The unique user identifier assigned by the adapter.
    pub id: UserId,

    /// User's email address.
    pub email: String,

    /// Display name if available.
    pub name: Option<String>,

    /// Billing subscription held by the user, if any.
    pub subscription_id: Option<String>,
}

impl User {
    /// Creates a user with no subscription.
    pub fn new(id: UserId, email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name,
            subscription_id: None,
        }
    }

    /// Returns the user with the given subscription attached.
    pub fn with_subscription(mut self, subscription_id: impl Into<String>) -> Self {
        self.subscription_id = Some(subscription_id.into());
        self
    }

    /// True once the billing provider has recorded a subscription.
    pub fn is_subscribed(&self) -> bool {
        self.subscription_id.is_some()
    }
}

/// A persisted login session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    pub expires: Timestamp,
}

impl Session {
    pub fn new(token: SessionToken, user_id: UserId, expires: Timestamp) -> Self {
        Self {
            token,
            user_id,
            expires,
        }
    }

    /// A session stops counting at its expiry instant.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        now.is_before(&self.expires)
    }
}

/// Authentication errors raised while resolving a request's session.
///
/// These errors are **domain-centric**; adapters map their own failures onto
/// them.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is not known to the adapter.
    #[error("Invalid session token")]
    InvalidToken,

    /// The session exists but has expired.
    #[error("Session expired")]
    SessionExpired,

    /// The persistence adapter is unavailable.
    #[error("Adapter unavailable: {0}")]
    AdapterUnavailable(String),
}

impl AuthError {
    /// Creates an adapter unavailable error with a message.
    pub fn adapter_unavailable(message: impl Into<String>) -> Self {
        Self::AdapterUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::AdapterUnavailable(_))
    }
}
