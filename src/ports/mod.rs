//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the hook and the outside world. Adapters implement these ports.
//!
//! - `AuthAdapter` - user and session persistence
//! - `PlanCatalog` - plan lookup by id and default plan
//! - `BillingProvider` - subscription and checkout creation

mod auth_adapter;
mod billing_provider;
mod plan_catalog;

pub use auth_adapter::AuthAdapter;
pub use billing_provider::{
    BillingError, BillingErrorCode, BillingProvider, CheckoutSession, CreateCheckoutRequest,
    Subscription, SubscriptionStatus,
};
pub use plan_catalog::PlanCatalog;
