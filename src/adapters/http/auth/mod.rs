//! HTTP adapter for the `/auth` mount.
//!
//! Lists sign-in providers, reports the current session and signs out.

mod dto;
mod handlers;
mod routes;

pub use dto::{ProviderResponse, SessionResponse, SessionUserResponse};
pub use handlers::{get_session, list_providers, sign_out};
pub use routes::auth_routes;
