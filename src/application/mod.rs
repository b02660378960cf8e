//! Application layer - Commands, Handlers and hook setup.
//!
//! This layer orchestrates domain rules and coordinates between ports.

pub mod handlers;
pub mod setup;

pub use handlers::auth::{SignOutCommand, SignOutHandler};
pub use handlers::billing::{
    CheckoutOutcome, StartCheckoutCommand, StartCheckoutHandler, StartCheckoutResult,
};
pub use setup::{KitAuthOptions, SetupError};
