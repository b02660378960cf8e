//! PostgreSQL implementation of AuthAdapter.
//!
//! Expects two tables:
//!
//! ```sql
//! CREATE TABLE users (
//!     id              TEXT PRIMARY KEY,
//!     email           TEXT NOT NULL UNIQUE,
//!     name            TEXT,
//!     subscription_id TEXT
//! );
//!
//! CREATE TABLE sessions (
//!     session_token TEXT PRIMARY KEY,
//!     user_id       TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     expires       TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, Session, SessionToken, Timestamp, User, UserId,
};
use crate::ports::AuthAdapter;

/// PostgreSQL implementation of the AuthAdapter port.
pub struct PostgresAuthAdapter {
    pool: PgPool,
}

impl PostgresAuthAdapter {
    /// Creates a new PostgresAuthAdapter with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: Option<String>,
    subscription_id: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
            })?,
            email: row.email,
            name: row.name,
            subscription_id: row.subscription_id,
        })
    }
}

/// Joined session + user row.
#[derive(Debug, sqlx::FromRow)]
struct SessionUserRow {
    session_token: String,
    expires: DateTime<Utc>,
    id: String,
    email: String,
    name: Option<String>,
    subscription_id: Option<String>,
}

impl TryFrom<SessionUserRow> for (Session, User) {
    type Error = DomainError;

    fn try_from(row: SessionUserRow) -> Result<Self, Self::Error> {
        let user = User::try_from(UserRow {
            id: row.id,
            email: row.email,
            name: row.name,
            subscription_id: row.subscription_id,
        })?;
        let token = SessionToken::new(row.session_token).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid session token: {}", e))
        })?;
        let session = Session::new(token, user.id.clone(), Timestamp::from_datetime(row.expires));
        Ok((session, user))
    }
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl AuthAdapter for PostgresAuthAdapter {
    async fn create_user(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, subscription_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.as_str())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.subscription_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("create user", e))?;

        Ok(())
    }

    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, name, subscription_id FROM users WHERE id = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, name, subscription_id FROM users WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn create_session(&self, session: &Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (session_token, user_id, expires)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session.token.as_str())
        .bind(session.user_id.as_str())
        .bind(session.expires.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return DomainError::user_not_found(&session.user_id);
                }
            }
            db_error("create session", e)
        })?;

        Ok(())
    }

    async fn get_session_and_user(
        &self,
        token: &SessionToken,
    ) -> Result<Option<(Session, User)>, DomainError> {
        let row: Option<SessionUserRow> = sqlx::query_as(
            r#"
            SELECT s.session_token, s.expires, u.id, u.email, u.name, u.subscription_id
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.session_token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find session", e))?;

        row.map(<(Session, User)>::try_from).transpose()
    }

    async fn delete_session(&self, token: &SessionToken) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sessions WHERE session_token = $1")
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete session", e))?;

        Ok(())
    }

    async fn set_subscription(
        &self,
        user_id: &UserId,
        subscription_id: Option<String>,
    ) -> Result<User, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            UPDATE users SET subscription_id = $2
            WHERE id = $1
            RETURNING id, email, name, subscription_id
            "#,
        )
        .bind(user_id.as_str())
        .bind(subscription_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("update subscription", e))?;

        row.map(User::try_from).transpose()?.ok_or_else(|| DomainError::user_not_found(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn user_row_maps_to_user() {
        let row = UserRow {
            id: "user-1".to_string(),
            email: "user@example.com".to_string(),
            name: None,
            subscription_id: Some("sub_1".to_string()),
        };

        let user = User::try_from(row).unwrap();
        assert_eq!(user.id.as_str(), "user-1");
        assert!(user.is_subscribed());
    }

    #[test]
    fn blank_user_id_is_a_database_error() {
        let row = UserRow {
            id: String::new(),
            email: "user@example.com".to_string(),
            name: None,
            subscription_id: None,
        };

        let err = User::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn joined_row_maps_to_session_and_user() {
        let expires = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let row = SessionUserRow {
            session_token: "tok".to_string(),
            expires,
            id: "user-1".to_string(),
            email: "user@example.com".to_string(),
            name: Some("User".to_string()),
            subscription_id: None,
        };

        let (session, user) = <(Session, User)>::try_from(row).unwrap();
        assert_eq!(session.token.as_str(), "tok");
        assert_eq!(session.user_id, user.id);
        assert_eq!(session.expires.as_datetime(), &expires);
    }
}
