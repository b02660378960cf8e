//! Billing provider configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BillingConfig {
    /// Base URL for hosted checkout pages issued by the development provider
    #[serde(default = "default_checkout_base_url")]
    pub checkout_base_url: String,
}

impl BillingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.checkout_base_url.starts_with("http://")
            || self.checkout_base_url.starts_with("https://")
        {
            Ok(())
        } else {
            Err(ValidationError::InvalidCheckoutBaseUrl)
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            checkout_base_url: default_checkout_base_url(),
        }
    }
}

fn default_checkout_base_url() -> String {
    "http://localhost:5173/checkout".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(BillingConfig::default().validate().is_ok());
    }

    #[test]
    fn non_http_base_is_rejected() {
        let billing = BillingConfig {
            checkout_base_url: "ftp://pay.example.com".to_string(),
        };
        assert_eq!(
            billing.validate(),
            Err(ValidationError::InvalidCheckoutBaseUrl)
        );
    }
}
