//! HTTP middleware for axum.
//!
//! - `session` - Session resolution middleware and extractor

pub mod session;

pub use session::{
    resolve_session, session_middleware, session_token, CurrentSession, OptionalSession,
};
