//! Axum router configuration for `/billing` endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::state::KitAuthState;

use super::handlers::{checkout, list_plans};

/// Create the billing router, mounted at `/billing`.
///
/// # Routes
/// - `GET /plans` - All plans in configuration order
/// - `GET|POST /checkout[?plan=ID]` - Subscribe or redirect to payment (303)
pub fn billing_routes() -> Router<KitAuthState> {
    Router::new()
        .route("/plans", get(list_plans))
        .route("/checkout", get(checkout).post(checkout))
}
