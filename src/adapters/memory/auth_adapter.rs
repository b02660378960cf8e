//! In-Memory Auth Adapter
//!
//! Stores users and sessions in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, Session, SessionToken, User, UserId,
};
use crate::ports::AuthAdapter;

/// In-memory storage for users and sessions
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthAdapter {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
}

impl InMemoryAuthAdapter {
    /// Create a new in-memory adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl AuthAdapter for InMemoryAuthAdapter {
    async fn create_user(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("User {} already exists", user.id),
            ));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_session(&self, session: &Session) -> Result<(), DomainError> {
        if !self.users.read().await.contains_key(&session.user_id) {
            return Err(DomainError::user_not_found(&session.user_id));
        }
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn get_session_and_user(
        &self,
        token: &SessionToken,
    ) -> Result<Option<(Session, User)>, DomainError> {
        let Some(session) = self.sessions.read().await.get(token).cloned() else {
            return Ok(None);
        };
        let user = self.users.read().await.get(&session.user_id).cloned();
        Ok(user.map(|user| (session, user)))
    }

    async fn delete_session(&self, token: &SessionToken) -> Result<(), DomainError> {
        self.sessions.write().await.remove(token);
        Ok(())
    }

    async fn set_subscription(
        &self,
        user_id: &UserId,
        subscription_id: Option<String>,
    ) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or_else(|| DomainError::user_not_found(user_id))?;
        user.subscription_id = subscription_id;
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn user(id: &str) -> User {
        User::new(UserId::new(id).unwrap(), format!("{}@example.com", id), None)
    }

    #[tokio::test]
    async fn create_and_get_user() {
        let adapter = InMemoryAuthAdapter::new();
        adapter.create_user(&user("alice")).await.unwrap();

        let found = adapter.get_user(&UserId::new("alice").unwrap()).await.unwrap();
        assert_eq!(found.unwrap().email, "alice@example.com");
    }

    #[tokio::test]
    async fn duplicate_user_is_rejected() {
        let adapter = InMemoryAuthAdapter::new();
        adapter.create_user(&user("alice")).await.unwrap();

        assert!(adapter.create_user(&user("alice")).await.is_err());
    }

    #[tokio::test]
    async fn get_user_by_email_ignores_case() {
        let adapter = InMemoryAuthAdapter::new();
        adapter.create_user(&user("alice")).await.unwrap();

        let found = adapter.get_user_by_email("ALICE@example.com").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn session_for_unknown_user_is_rejected() {
        let adapter = InMemoryAuthAdapter::new();
        let session = Session::new(
            SessionToken::generate(),
            UserId::new("ghost").unwrap(),
            Timestamp::now().add_days(1).unwrap(),
        );

        let err = adapter.create_session(&session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn resolves_session_to_user() {
        let adapter = InMemoryAuthAdapter::new();
        adapter.create_user(&user("alice")).await.unwrap();
        let token = SessionToken::generate();
        let session = Session::new(
            token.clone(),
            UserId::new("alice").unwrap(),
            Timestamp::now().add_days(1).unwrap(),
        );
        adapter.create_session(&session).await.unwrap();

        let (found_session, found_user) =
            adapter.get_session_and_user(&token).await.unwrap().unwrap();
        assert_eq!(found_session.token, token);
        assert_eq!(found_user.id.as_str(), "alice");
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_none() {
        let adapter = InMemoryAuthAdapter::new();
        let result = adapter
            .get_session_and_user(&SessionToken::generate())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_session_is_idempotent() {
        let adapter = InMemoryAuthAdapter::new();
        let token = SessionToken::generate();
        adapter.delete_session(&token).await.unwrap();
        adapter.delete_session(&token).await.unwrap();
        assert_eq!(adapter.session_count().await, 0);
    }

    #[tokio::test]
    async fn set_subscription_updates_user() {
        let adapter = InMemoryAuthAdapter::new();
        adapter.create_user(&user("alice")).await.unwrap();
        let id = UserId::new("alice").unwrap();

        let updated = adapter
            .set_subscription(&id, Some("sub_1".to_string()))
            .await
            .unwrap();

        assert!(updated.is_subscribed());
        assert!(adapter.get_user(&id).await.unwrap().unwrap().is_subscribed());
    }

    #[tokio::test]
    async fn set_subscription_for_unknown_user_fails() {
        let adapter = InMemoryAuthAdapter::new();
        let result = adapter
            .set_subscription(&UserId::new("ghost").unwrap(), None)
            .await;
        assert!(result.is_err());
    }
}
