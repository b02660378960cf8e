//! StartCheckoutHandler - Command handler for starting a subscription.
//!
//! Free and trial plans are subscribed on the spot and the user is sent to the
//! configured success page. Paid plans go through the billing provider's hosted
//! checkout and the user is sent there instead.

use std::sync::Arc;

use crate::config::CheckoutPages;
use crate::domain::billing::{CheckoutError, Plan};
use crate::domain::foundation::{PlanId, User};
use crate::ports::{BillingProvider, CreateCheckoutRequest, PlanCatalog};

/// Command to start checkout for the current user.
#[derive(Debug, Clone)]
pub struct StartCheckoutCommand {
    /// The signed-in user, if any.
    pub user: Option<User>,
    /// Plan id exactly as requested; `None` selects the default plan.
    pub plan_id: Option<String>,
}

/// Which path the checkout took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Subscription created without payment.
    Subscribed { subscription_id: String },
    /// User must complete payment at the provider.
    PaymentRequired { session_id: String },
}

/// Result of a successful checkout start.
#[derive(Debug, Clone)]
pub struct StartCheckoutResult {
    pub plan: Plan,
    pub outcome: CheckoutOutcome,
    /// Where the user should be sent next (303).
    pub redirect_to: String,
}

pub struct StartCheckoutHandler {
    plans: Arc<dyn PlanCatalog>,
    billing: Arc<dyn BillingProvider>,
    pages: CheckoutPages,
}

impl StartCheckoutHandler {
    pub fn new(
        plans: Arc<dyn PlanCatalog>,
        billing: Arc<dyn BillingProvider>,
        pages: CheckoutPages,
    ) -> Self {
        Self {
            plans,
            billing,
            pages,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartCheckoutCommand,
    ) -> Result<StartCheckoutResult, CheckoutError> {
        let user = cmd.user.ok_or(CheckoutError::AuthenticationRequired)?;

        if user.is_subscribed() {
            return Err(CheckoutError::already_subscribed(user.id));
        }

        let plan = self.resolve_plan(cmd.plan_id)?;

        if plan.subscribes_immediately() {
            let subscription = self
                .billing
                .create_subscription(&user, &plan)
                .await
                .map_err(|e| {
                    tracing::error!(
                        user_id = %user.id,
                        plan_id = %plan.id,
                        retryable = e.is_retryable(),
                        "Subscription failed: {}", e
                    );
                    CheckoutError::provider(e.message)
                })?;

            tracing::info!(
                user_id = %user.id,
                plan_id = %plan.id,
                subscription_id = %subscription.id,
                "Subscribed without checkout"
            );

            Ok(StartCheckoutResult {
                plan,
                outcome: CheckoutOutcome::Subscribed {
                    subscription_id: subscription.id,
                },
                redirect_to: self.pages.success.clone(),
            })
        } else {
            let request = CreateCheckoutRequest {
                user,
                plan,
                success_url: self.pages.success.clone(),
                cancel_url: self.pages.cancel.clone(),
            };

            let session = self.billing.create_checkout(&request).await.map_err(|e| {
                tracing::error!(
                    user_id = %request.user.id,
                    plan_id = %request.plan.id,
                    retryable = e.is_retryable(),
                    "Checkout failed: {}", e
                );
                CheckoutError::provider(e.message)
            })?;

            tracing::info!(
                user_id = %request.user.id,
                plan_id = %request.plan.id,
                "Redirecting to checkout"
            );

            Ok(StartCheckoutResult {
                plan: request.plan,
                redirect_to: session.url,
                outcome: CheckoutOutcome::PaymentRequired {
                    session_id: session.id,
                },
            })
        }
    }

    /// A requested id that is not a valid `PlanId` cannot name a configured
    /// plan, so it is reported as not found rather than falling back.
    fn resolve_plan(&self, plan_id: Option<String>) -> Result<Plan, CheckoutError> {
        match plan_id {
            Some(raw) => PlanId::new(raw.as_str())
                .ok()
                .and_then(|id| self.plans.get_by_id(&id))
                .ok_or(CheckoutError::PlanNotFound(raw)),
            None => self.plans.get_default().ok_or(CheckoutError::NoPlan),
        }
    }
}
