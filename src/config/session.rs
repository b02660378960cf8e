//! Session cookie configuration

use serde::Deserialize;

use super::error::ValidationError;

pub const DEFAULT_COOKIE_NAME: &str = "kit-auth.session-token";

/// Longest accepted session lifetime, in days.
pub const MAX_SESSION_DAYS: i64 = 3650;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Cookie carrying the session token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Lifetime of newly issued sessions
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,

    /// Mark the cookie `Secure`
    #[serde(default)]
    pub secure_cookie: bool,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let valid_name = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid_name {
            return Err(ValidationError::InvalidCookieName);
        }
        if !(1..=MAX_SESSION_DAYS).contains(&self.max_age_days) {
            return Err(ValidationError::InvalidSessionLifetime);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            max_age_days: default_max_age_days(),
            secure_cookie: false,
        }
    }
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_max_age_days() -> i64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let session = SessionConfig::default();
        assert_eq!(session.cookie_name, "kit-auth.session-token");
        assert_eq!(session.max_age_days, 30);
        assert!(session.validate().is_ok());
    }

    #[test]
    fn cookie_name_with_separator_is_rejected() {
        let session = SessionConfig {
            cookie_name: "bad;name".to_string(),
            ..Default::default()
        };
        assert_eq!(session.validate(), Err(ValidationError::InvalidCookieName));
    }

    #[test]
    fn zero_day_sessions_are_rejected() {
        let session = SessionConfig {
            max_age_days: 0,
            ..Default::default()
        };
        assert_eq!(
            session.validate(),
            Err(ValidationError::InvalidSessionLifetime)
        );
    }

    #[test]
    fn lifetime_beyond_ten_years_is_rejected() {
        let too_long = SessionConfig {
            max_age_days: MAX_SESSION_DAYS + 1,
            ..Default::default()
        };
        let longest = SessionConfig {
            max_age_days: MAX_SESSION_DAYS,
            ..Default::default()
        };
        assert_eq!(
            too_long.validate(),
            Err(ValidationError::InvalidSessionLifetime)
        );
        assert!(longest.validate().is_ok());
    }
}
