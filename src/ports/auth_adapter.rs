//! Persistence adapter port for users and sessions.
//!
//! The hook never talks to a database directly. Everything it needs to know
//! about users and sessions goes through this trait, so the same router runs
//! on the in-memory store in tests and on PostgreSQL in production.
//!
//! # Contract
//!
//! Implementations must:
//! - Return `Ok(None)` for unknown users and tokens, never an error
//! - Return the session even when it has expired; callers decide freshness
//! - Make `delete_session` idempotent
//! - Return `ErrorCode::UserNotFound` from `set_subscription` for unknown users

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Session, SessionToken, User, UserId};

#[async_trait]
pub trait AuthAdapter: Send + Sync {
    /// Persist a new user.
    async fn create_user(&self, user: &User) -> Result<(), DomainError>;

    /// Look up a user by id.
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, DomainError>;

    /// Look up a user by email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new session for an existing user.
    async fn create_session(&self, session: &Session) -> Result<(), DomainError>;

    /// Resolve a session token to the session and its owner.
    async fn get_session_and_user(
        &self,
        token: &SessionToken,
    ) -> Result<Option<(Session, User)>, DomainError>;

    /// Remove a session. Unknown tokens are not an error.
    async fn delete_session(&self, token: &SessionToken) -> Result<(), DomainError>;

    /// Attach (or clear) the user's subscription and return the updated user.
    async fn set_subscription(
        &self,
        user_id: &UserId,
        subscription_id: Option<String>,
    ) -> Result<User, DomainError>;
}
