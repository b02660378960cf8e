//! HTTP adapter for the `/billing` mount.
//!
//! Lists plans and starts checkout.

mod dto;
mod handlers;
mod routes;

pub use dto::{CheckoutQuery, PlanResponse};
pub use handlers::{checkout, list_plans, CheckoutApiError};
pub use routes::billing_routes;
