//! Plan catalog port.
//!
//! Resolves the plan a checkout request refers to. Lookups are synchronous;
//! plans are configuration, not remote data.

use crate::domain::billing::Plan;
use crate::domain::foundation::PlanId;

pub trait PlanCatalog: Send + Sync {
    /// Find a plan by its id.
    fn get_by_id(&self, id: &PlanId) -> Option<Plan>;

    /// The plan used when checkout names no plan, if one is configured.
    fn get_default(&self) -> Option<Plan>;

    /// All plans, in presentation order.
    fn list(&self) -> Vec<Plan>;
}
