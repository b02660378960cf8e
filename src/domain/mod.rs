//! Domain layer - core types with no infrastructure dependencies.

pub mod auth;
pub mod billing;
pub mod foundation;
