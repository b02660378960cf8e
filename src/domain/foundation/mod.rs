//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, auth types, and error types
//! that the auth and billing modules build on.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, Session, User};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PlanId, SessionToken, UserId};
pub use timestamp::Timestamp;
