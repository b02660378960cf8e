//! Billing provider port for subscription and checkout creation.
//!
//! Defines the contract for payment gateway integrations. The checkout flow
//! only ever needs two operations:
//!
//! - `create_subscription` for plans that start without payment (free or trial)
//! - `create_checkout` for plans that need the user to pay first
//!
//! # Design
//!
//! - **Gateway agnostic**: Interface works with any payment provider
//! - **Provider owns subscription state**: recording the subscription on the
//!   user (via the auth adapter) is the provider's job, not the router's

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::billing::Plan;
use crate::domain::foundation::{PlanId, User, UserId};

/// Port for billing provider integrations.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Start a subscription immediately, without collecting payment.
    async fn create_subscription(
        &self,
        user: &User,
        plan: &Plan,
    ) -> Result<Subscription, BillingError>;

    /// Create a hosted checkout session for a paid plan.
    ///
    /// Returns a URL for the customer to complete payment.
    async fn create_checkout(
        &self,
        request: &CreateCheckoutRequest,
    ) -> Result<CheckoutSession, BillingError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone)]
pub struct CreateCheckoutRequest {
    pub user: User,

    pub plan: Plan,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after canceled checkout.
    pub cancel_url: String,
}

/// Subscription in the billing system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Provider's subscription ID.
    pub id: String,

    pub user_id: UserId,

    pub plan_id: PlanId,

    pub status: SubscriptionStatus,
}

/// Subscription status from billing provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Subscription is active and current.
    Active,

    /// Subscription is in trial period.
    Trialing,
}

impl SubscriptionStatus {
    /// Status a plan starts in when subscribed without checkout.
    pub fn initial_for(plan: &Plan) -> Self {
        if plan.has_trial() {
            SubscriptionStatus::Trialing
        } else {
            SubscriptionStatus::Active
        }
    }
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for customer to complete checkout.
    pub url: String,
}

/// Errors from billing provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingError {
    /// Error code for categorization.
    pub code: BillingErrorCode,

    /// Human-readable message.
    pub message: String,

}

impl BillingError {
    /// Create a new billing error.
    pub fn new(code: BillingErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::NetworkError, message)
    }

    /// Create a provider-side rejection.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(BillingErrorCode::Rejected, message)
    }

    /// Whether the failure is typically transient.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for BillingError {}

/// Billing error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Provider refused the request (invalid plan, customer blocked, ...).
    Rejected,

    /// Persisting the subscription failed.
    StorageError,
}

impl BillingErrorCode {
    pub fn is_retryable(&self) -> bool {
        matches!(self, BillingErrorCode::NetworkError)
    }
}

impl std::fmt::Display for BillingErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BillingErrorCode::NetworkError => "network_error",
            BillingErrorCode::Rejected => "rejected",
            BillingErrorCode::StorageError => "storage_error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn billing_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn BillingProvider) {}
    }

    #[test]
    fn initial_status_follows_trial() {
        let plan = Plan::new(PlanId::new("pro").unwrap(), "Pro");
        assert_eq!(SubscriptionStatus::initial_for(&plan), SubscriptionStatus::Active);
        assert_eq!(
            SubscriptionStatus::initial_for(&plan.with_trial(14)),
            SubscriptionStatus::Trialing
        );
    }

    #[test]
    fn billing_error_display() {
        let err = BillingError::rejected("Plan is archived");
        assert!(err.to_string().contains("rejected"));
        assert!(err.to_string().contains("Plan is archived"));
    }

    #[test]
    fn only_network_errors_are_retryable() {
        assert!(BillingError::network("timeout").is_retryable());
        assert!(!BillingError::rejected("no").is_retryable());
    }
}
