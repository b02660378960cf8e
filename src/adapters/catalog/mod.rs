//! Plan catalog built from configured plans.

use crate::domain::billing::Plan;
use crate::domain::foundation::PlanId;
use crate::ports::PlanCatalog;

/// Immutable catalog over the plans passed at setup.
#[derive(Debug, Clone)]
pub struct StaticPlanCatalog {
    plans: Vec<Plan>,
}

impl StaticPlanCatalog {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self { plans }
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl PlanCatalog for StaticPlanCatalog {
    fn get_by_id(&self, id: &PlanId) -> Option<Plan> {
        self.plans.iter().find(|p| &p.id == id).cloned()
    }

    fn get_default(&self) -> Option<Plan> {
        self.plans.iter().find(|p| p.default).cloned()
    }

    fn list(&self) -> Vec<Plan> {
        self.plans.clone()
    }
}
