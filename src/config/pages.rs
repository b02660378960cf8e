//! Pages the hook redirects to

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PagesConfig {
    #[serde(default)]
    pub checkout: CheckoutPages,

    /// Where `POST /auth/signout` sends the browser
    #[serde(default = "default_page")]
    pub sign_out: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CheckoutPages {
    /// Target after a subscription is created without payment
    #[serde(default = "default_page")]
    pub success: String,

    /// Where the billing provider sends a user who abandons checkout
    #[serde(default = "default_page")]
    pub cancel: String,
}

impl PagesConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_page("pages.checkout.success", &self.checkout.success)?;
        check_page("pages.checkout.cancel", &self.checkout.cancel)?;
        check_page("pages.sign_out", &self.sign_out)?;
        Ok(())
    }
}

fn check_page(name: &'static str, page: &str) -> Result<(), ValidationError> {
    let ok = page.starts_with('/')
        || page.starts_with("http://")
        || page.starts_with("https://");
    if ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidPage(name))
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            checkout: CheckoutPages::default(),
            sign_out: default_page(),
        }
    }
}

impl Default for CheckoutPages {
    fn default() -> Self {
        Self {
            success: default_page(),
            cancel: default_page(),
        }
    }
}

fn default_page() -> String {
    "/".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_home() {
        let pages = PagesConfig::default();
        assert_eq!(pages.checkout.success, "/");
        assert_eq!(pages.sign_out, "/");
        assert!(pages.validate().is_ok());
    }

    #[test]
    fn absolute_urls_are_allowed() {
        let mut pages = PagesConfig::default();
        pages.checkout.success = "https://app.example.com/welcome".to_string();
        assert!(pages.validate().is_ok());
    }

    #[test]
    fn relative_page_is_rejected() {
        let mut pages = PagesConfig::default();
        pages.sign_out = "goodbye".to_string();
        assert_eq!(
            pages.validate(),
            Err(ValidationError::InvalidPage("pages.sign_out"))
        );
    }
}
