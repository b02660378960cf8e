//! HTTP adapters - the request hook and its routes.
//!
//! - `hook` - `KitAuth`, its tower layer and dispatcher
//! - `auth` - `/auth` routes
//! - `billing` - `/billing` routes
//! - `middleware` - Session resolution

pub mod auth;
pub mod billing;
pub mod dto;
pub mod hook;
pub mod middleware;
pub mod mount;
pub mod state;

pub use dto::ErrorResponse;
pub use hook::{KitAuth, KitAuthLayer, KitAuthService};
pub use middleware::{CurrentSession, OptionalSession};
pub use mount::Mount;
pub use state::KitAuthState;
