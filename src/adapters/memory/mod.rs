//! In-memory adapters for tests and the development server.

mod auth_adapter;
mod billing_provider;

pub use auth_adapter::InMemoryAuthAdapter;
pub use billing_provider::{CompletedCheckout, InMemoryBillingProvider, MethodCall};
