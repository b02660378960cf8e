//! PostgreSQL adapters - Database implementations for persistence ports.
//!
//! - `PostgresAuthAdapter` - Users and sessions

mod auth_adapter;

pub use auth_adapter::PostgresAuthAdapter;
