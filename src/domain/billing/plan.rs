//! Subscription plan definitions.
//!
//! Plans are declared in configuration and never mutated at runtime.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PlanId;

/// A subscription tier offered to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Identifier used in `?plan=` query parameters.
    pub id: PlanId,

    /// Display name.
    pub name: String,

    /// Price in minor currency units (cents). `None` means the billing
    /// provider owns pricing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,

    /// Trial length in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial: Option<u32>,

    /// Used when checkout is started without an explicit plan.
    #[serde(default)]
    pub default: bool,
}

impl Plan {
    pub fn new(id: PlanId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price: None,
            trial: None,
            default: false,
        }
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_trial(mut self, days: u32) -> Self {
        self.trial = Some(days);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Explicitly priced at zero. An unpriced plan is not free.
    pub fn is_free(&self) -> bool {
        self.price == Some(0)
    }

    pub fn has_trial(&self) -> bool {
        self.trial.is_some_and(|days| days > 0)
    }

    /// Free and trial plans subscribe immediately instead of going through
    /// an external checkout.
    pub fn subscribes_immediately(&self) -> bool {
        self.is_free() || self.has_trial()
    }
}
