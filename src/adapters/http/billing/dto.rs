//! Request and response bodies for `/billing` routes.

use serde::{Deserialize, Serialize};

use crate::domain::billing::Plan;
use crate::domain::foundation::PlanId;

/// Query string of `/billing/checkout`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutQuery {
    pub plan: Option<String>,
}

impl CheckoutQuery {
    /// Requested plan; only an empty `?plan=` counts as not given.
    pub fn plan_id(&self) -> Option<String> {
        self.plan.clone().filter(|id| !id.is_empty())
    }
}

/// One entry of `GET /billing/plans`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlanResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial: Option<u32>,
    pub default: bool,
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan.id.to_string(),
            name: plan.name,
            price: plan.price,
            trial: plan.trial,
            default: plan.default,
        }
    }
}
