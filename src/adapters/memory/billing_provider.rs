//! In-memory billing provider.
//!
//! Development stand-in for a real payment gateway. Supports:
//! - Immediate subscriptions recorded through the auth adapter
//! - Checkout sessions with URLs under a configurable base
//! - Completing or abandoning a checkout as the gateway would, returning the
//!   success or cancel URL the checkout was opened with
//! - Error injection and call tracking for tests

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::billing::Plan;
use crate::domain::foundation::{PlanId, User, UserId};
use crate::ports::{
    AuthAdapter, BillingError, BillingErrorCode, BillingProvider, CheckoutSession,
    CreateCheckoutRequest, Subscription, SubscriptionStatus,
};

/// Recorded method call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub method: &'static str,
    pub user_id: UserId,
    pub plan_id: PlanId,
}

/// A paid checkout, and where the user goes once it is settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedCheckout {
    pub subscription: Subscription,
    pub redirect_to: String,
}

struct PendingCheckout {
    user_id: UserId,
    plan_id: PlanId,
    success_url: String,
    cancel_url: String,
}

#[derive(Default)]
struct State {
    /// Open checkout sessions awaiting payment.
    pending: HashMap<String, PendingCheckout>,
    next_error: Option<BillingError>,
    call_log: Vec<MethodCall>,
}

pub struct InMemoryBillingProvider {
    adapter: Arc<dyn AuthAdapter>,
    checkout_base_url: String,
    state: Mutex<State>,
}

impl InMemoryBillingProvider {
    pub fn new(adapter: Arc<dyn AuthAdapter>, checkout_base_url: impl Into<String>) -> Self {
        Self {
            adapter,
            checkout_base_url: checkout_base_url.into().trim_end_matches('/').to_string(),
            state: Mutex::new(State::default()),
        }
    }

    /// Make the next call fail with `error`.
    pub async fn fail_next(&self, error: BillingError) {
        self.state.lock().await.next_error = Some(error);
    }

    pub async fn calls(&self) -> Vec<MethodCall> {
        self.state.lock().await.call_log.clone()
    }

    /// Mark a checkout session as paid and subscribe its user.
    pub async fn complete_checkout(
        &self,
        session_id: &str,
    ) -> Result<CompletedCheckout, BillingError> {
        let pending = self.take_pending(session_id).await?;

        let subscription = self
            .record_subscription(pending.user_id, pending.plan_id, SubscriptionStatus::Active)
            .await?;

        Ok(CompletedCheckout {
            subscription,
            redirect_to: pending.success_url,
        })
    }

    /// Drop a checkout session unpaid; returns its cancel URL.
    pub async fn abandon_checkout(&self, session_id: &str) -> Result<String, BillingError> {
        Ok(self.take_pending(session_id).await?.cancel_url)
    }

    async fn take_pending(&self, session_id: &str) -> Result<PendingCheckout, BillingError> {
        self.state
            .lock()
            .await
            .pending
            .remove(session_id)
            .ok_or_else(|| {
                BillingError::rejected(format!("Unknown checkout session {}", session_id))
            })
    }

    async fn begin_call(
        &self,
        method: &'static str,
        user: &User,
        plan: &Plan,
    ) -> Result<(), BillingError> {
        let mut state = self.state.lock().await;
        state.call_log.push(MethodCall {
            method,
            user_id: user.id.clone(),
            plan_id: plan.id.clone(),
        });
        match state.next_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn record_subscription(
        &self,
        user_id: UserId,
        plan_id: PlanId,
        status: SubscriptionStatus,
    ) -> Result<Subscription, BillingError> {
        let id = format!("sub_{}", Uuid::new_v4().simple());
        self.adapter
            .set_subscription(&user_id, Some(id.clone()))
            .await
            .map_err(|e| BillingError::new(BillingErrorCode::StorageError, e.message))?;

        Ok(Subscription {
            id,
            user_id,
            plan_id,
            status,
        })
    }
}

#[async_trait]
impl BillingProvider for InMemoryBillingProvider {
    async fn create_subscription(
        &self,
        user: &User,
        plan: &Plan,
    ) -> Result<Subscription, BillingError> {
        self.begin_call("create_subscription", user, plan).await?;
        self.record_subscription(
            user.id.clone(),
            plan.id.clone(),
            SubscriptionStatus::initial_for(plan),
        )
        .await
    }

    async fn create_checkout(
        &self,
        request: &CreateCheckoutRequest,
    ) -> Result<CheckoutSession, BillingError> {
        self.begin_call("create_checkout", &request.user, &request.plan)
            .await?;

        let id = format!("cs_{}", Uuid::new_v4().simple());
        self.state.lock().await.pending.insert(
            id.clone(),
            PendingCheckout {
                user_id: request.user.id.clone(),
                plan_id: request.plan.id.clone(),
                success_url: request.success_url.clone(),
                cancel_url: request.cancel_url.clone(),
            },
        );

        Ok(CheckoutSession {
            url: format!("{}/{}", self.checkout_base_url, id),
            id,
        })
    }
}
