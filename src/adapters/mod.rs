//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the hook to external systems:
//! - `http` - The axum hook and its routes
//! - `memory` - In-memory auth adapter and billing provider
//! - `postgres` - PostgreSQL auth adapter
//! - `catalog` - Plan catalog over configured plans

pub mod catalog;
pub mod http;
pub mod memory;
pub mod postgres;

pub use catalog::StaticPlanCatalog;
pub use memory::{InMemoryAuthAdapter, InMemoryBillingProvider};
pub use postgres::PostgresAuthAdapter;
