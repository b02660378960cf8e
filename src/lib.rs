//! Kit Auth - authentication and subscription billing for axum applications
//!
//! A single request hook owns the `/auth` and `/billing` path prefixes and
//! hands every other request to the host application. Persistence, plan
//! lookup and payment are reached through the ports in [`ports`].
//!
//! ```ignore
//! use kit_auth::{KitAuth, KitAuthOptions};
//!
//! let kit = KitAuth::new(
//!     KitAuthOptions::new()
//!         .with_plans(plans)
//!         .with_providers(providers)
//!         .with_adapter(adapter)
//!         .with_billing(billing),
//! )?;
//! let app = host_router.layer(kit.layer());
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::http::{KitAuth, KitAuthLayer};
pub use application::{KitAuthOptions, SetupError};
