//! Hook options and the checks run before the hook is built.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{AppConfig, PagesConfig, SessionConfig, ValidationError};
use crate::domain::auth::Provider;
use crate::domain::billing::Plan;
use crate::domain::foundation::PlanId;
use crate::ports::{AuthAdapter, BillingProvider};

/// Everything the hook needs at construction.
#[derive(Clone, Default)]
pub struct KitAuthOptions {
    pub plans: Vec<Plan>,
    pub providers: Vec<Provider>,
    pub adapter: Option<Arc<dyn AuthAdapter>>,
    pub billing: Option<Arc<dyn BillingProvider>>,
    pub pages: PagesConfig,
    pub session: SessionConfig,
}

impl KitAuthOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plans, providers, pages and session settings from loaded configuration.
    /// Collaborators still have to be supplied.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            plans: config.plans.clone(),
            providers: config.providers.clone(),
            pages: config.pages.clone(),
            session: config.session.clone(),
            ..Self::default()
        }
    }

    pub fn with_plans(mut self, plans: Vec<Plan>) -> Self {
        self.plans = plans;
        self
    }

    pub fn with_providers(mut self, providers: Vec<Provider>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_adapter(mut self, adapter: Arc<dyn AuthAdapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    pub fn with_billing(mut self, billing: Arc<dyn BillingProvider>) -> Self {
        self.billing = Some(billing);
        self
    }

    pub fn with_pages(mut self, pages: PagesConfig) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = session;
        self
    }

    /// Reject unusable options. The first failing check wins.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.plans.is_empty() {
            return Err(SetupError::NoPlans);
        }
        if self.providers.is_empty() {
            return Err(SetupError::NoProviders);
        }
        if self.adapter.is_none() {
            return Err(SetupError::MissingAdapter);
        }
        if self.billing.is_none() {
            return Err(SetupError::MissingBilling);
        }

        let mut seen = HashSet::new();
        for plan in &self.plans {
            if !seen.insert(&plan.id) {
                return Err(SetupError::DuplicatePlan(plan.id.clone()));
            }
        }

        if self.plans.iter().filter(|p| p.default).count() > 1 {
            return Err(SetupError::MultipleDefaults);
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if !seen.insert(provider.id.as_str()) {
                return Err(SetupError::DuplicateProvider(provider.id.clone()));
            }
        }

        self.pages.validate().map_err(SetupError::InvalidSettings)?;
        self.session.validate().map_err(SetupError::InvalidSettings)?;

        Ok(())
    }
}

impl fmt::Debug for KitAuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KitAuthOptions")
            .field("plans", &self.plans)
            .field("providers", &self.providers)
            .field("adapter", &self.adapter.is_some())
            .field("billing", &self.billing.is_some())
            .field("pages", &self.pages)
            .field("session", &self.session)
            .finish()
    }
}

/// Why the hook could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("Must have at least one plan")]
    NoPlans,

    #[error("Must have at least one provider")]
    NoProviders,

    #[error("An adapter is required")]
    MissingAdapter,

    #[error("A billing provider is required")]
    MissingBilling,

    #[error("Duplicate plan id: {0}")]
    DuplicatePlan(PlanId),

    #[error("Only one plan may be marked as default")]
    MultipleDefaults,

    #[error("Duplicate provider id: {0}")]
    DuplicateProvider(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(ValidationError),
}
