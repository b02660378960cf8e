//! Billing command handlers.

mod start_checkout;

pub use start_checkout::{
    CheckoutOutcome, StartCheckoutCommand, StartCheckoutHandler, StartCheckoutResult,
};
