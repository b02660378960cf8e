//! Billing domain - plans and checkout rules.

mod errors;
mod plan;

pub use errors::CheckoutError;
pub use plan::Plan;
