//! Shared state for the hook's routes.

use std::sync::Arc;

use crate::application::{SignOutHandler, StartCheckoutHandler};
use crate::config::{PagesConfig, SessionConfig};
use crate::domain::auth::Provider;
use crate::ports::{AuthAdapter, BillingProvider, PlanCatalog};

/// Cloned into every request; all fields are cheap to clone.
#[derive(Clone)]
pub struct KitAuthState {
    pub adapter: Arc<dyn AuthAdapter>,
    pub plans: Arc<dyn PlanCatalog>,
    pub billing: Arc<dyn BillingProvider>,
    pub providers: Arc<[Provider]>,
    pub pages: Arc<PagesConfig>,
    pub session: Arc<SessionConfig>,
}

impl KitAuthState {
    pub fn start_checkout_handler(&self) -> StartCheckoutHandler {
        StartCheckoutHandler::new(
            self.plans.clone(),
            self.billing.clone(),
            self.pages.checkout.clone(),
        )
    }

    pub fn sign_out_handler(&self) -> SignOutHandler {
        SignOutHandler::new(self.adapter.clone())
    }
}
