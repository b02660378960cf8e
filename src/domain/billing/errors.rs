//! Checkout error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | AuthenticationRequired | 401 |
//! | AlreadySubscribed | 403 |
//! | NoPlan | 403 |
//! | PlanNotFound | 403 |
//! | Provider | 502 |

use thiserror::Error;

use crate::domain::foundation::UserId;

/// Errors raised by the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("User is already subscribed")]
    AlreadySubscribed(UserId),

    #[error("No default plan, and plan was not specified in URL")]
    NoPlan,

    #[error("Plan '{0}' does not exist")]
    PlanNotFound(String),

    #[error("Billing provider failed: {0}")]
    Provider(String),
}

impl CheckoutError {
    pub fn already_subscribed(user_id: UserId) -> Self {
        CheckoutError::AlreadySubscribed(user_id)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        CheckoutError::Provider(message.into())
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            CheckoutError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            CheckoutError::AlreadySubscribed(_) => "ALREADY_SUBSCRIBED",
            CheckoutError::NoPlan => "NO_PLAN",
            CheckoutError::PlanNotFound(_) => "PLAN_NOT_FOUND",
            CheckoutError::Provider(_) => "BILLING_PROVIDER_ERROR",
        }
    }
}
