//! Application handlers.
//!
//! Command handlers that orchestrate the ports on behalf of HTTP routes.

pub mod auth;
pub mod billing;
