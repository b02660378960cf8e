//! Application configuration module
//!
//! Type-safe configuration loading using the `config` and `dotenvy` crates.
//! Values come from an optional config file (`kit-auth.toml`, `.yaml` or
//! `.json`, or the path in `KIT_AUTH_CONFIG`) overlaid by environment
//! variables with the `KIT_AUTH` prefix and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use kit_auth::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr().unwrap());
//! ```

mod billing;
mod database;
mod error;
mod pages;
mod server;
mod session;

pub use billing::BillingConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use pages::{CheckoutPages, PagesConfig};
pub use server::{Environment, ServerConfig};
pub use session::{SessionConfig, DEFAULT_COOKIE_NAME, MAX_SESSION_DAYS};

use serde::Deserialize;

use crate::domain::auth::Provider;
use crate::domain::billing::Plan;

/// Environment variable naming the config file.
pub const CONFIG_FILE_VAR: &str = "KIT_AUTH_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "kit-auth";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection; `None` selects the in-memory adapter
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub pages: PagesConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub billing: BillingConfig,

    /// Subscription plans offered at checkout
    #[serde(default)]
    pub plans: Vec<Plan>,

    /// Sign-in providers listed at `/auth/providers`
    #[serde(default)]
    pub providers: Vec<Provider>,
}

impl AppConfig {
    /// Load configuration from the config file and environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the file named by `KIT_AUTH_CONFIG`, or `kit-auth.*`, if present
    /// 3. Overlays environment variables with `KIT_AUTH` prefix
    ///
    /// # Environment Variable Format
    ///
    /// - `KIT_AUTH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `KIT_AUTH__DATABASE__URL=...` -> `database.url = ...`
    /// - `KIT_AUTH__PAGES__SIGN_OUT=/bye` -> `pages.sign_out = "/bye"`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = std::env::var(CONFIG_FILE_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&file)
    }

    /// Load using an explicit config file path; a missing file is not an error.
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::default()
                    .prefix("KIT_AUTH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Plans and providers are checked when the hook is built, not here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.pages.validate()?;
        self.session.validate()?;
        self.billing.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const NO_FILE: &str = "/nonexistent/kit-auth-test";

    fn clear_env() {
        env::remove_var("KIT_AUTH__SERVER__PORT");
        env::remove_var("KIT_AUTH__SERVER__ENVIRONMENT");
        env::remove_var("KIT_AUTH__DATABASE__URL");
        env::remove_var("KIT_AUTH__PAGES__SIGN_OUT");
    }

    #[test]
    fn loads_defaults_without_sources() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let config = AppConfig::load_from(NO_FILE).unwrap();

        assert_eq!(config.server.port, 5173);
        assert!(config.database.is_none());
        assert_eq!(config.session.cookie_name, DEFAULT_COOKIE_NAME);
        assert!(config.plans.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("KIT_AUTH__SERVER__PORT", "3000");
        env::set_var("KIT_AUTH__SERVER__ENVIRONMENT", "production");
        env::set_var("KIT_AUTH__DATABASE__URL", "postgres://localhost/kit");
        env::set_var("KIT_AUTH__PAGES__SIGN_OUT", "/bye");
        let result = AppConfig::load_from(NO_FILE);
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(
            config.database.map(|db| db.url),
            Some("postgres://localhost/kit".to_string())
        );
        assert_eq!(config.pages.sign_out, "/bye");
    }

    #[test]
    fn loads_plans_and_providers_from_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kit-auth.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[pages.checkout]
success = "/welcome"

[[plans]]
id = "free"
name = "Free"
price = 0
default = true

[[plans]]
id = "pro"
name = "Pro"
price = 1200
trial = 14

[[providers]]
id = "github"
name = "GitHub"
type = "oauth"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(path.to_str().unwrap()).unwrap();

        assert_eq!(config.pages.checkout.success, "/welcome");
        assert_eq!(config.plans.len(), 2);
        assert!(config.plans[0].is_free());
        assert!(config.plans[0].default);
        assert_eq!(config.plans[1].trial, Some(14));
        assert_eq!(config.providers[0].display_name(), "GitHub");
    }

    #[test]
    fn environment_wins_over_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kit-auth.toml");
        std::fs::write(&path, "[server]\nport = 4000\n").unwrap();
        env::set_var("KIT_AUTH__SERVER__PORT", "4100");
        let result = AppConfig::load_from(path.to_str().unwrap());
        clear_env();

        assert_eq!(result.unwrap().server.port, 4100);
    }

    #[test]
    fn invalid_database_section_fails_validation() {
        let config = AppConfig {
            database: Some(DatabaseConfig {
                url: "mysql://localhost/kit".to_string(),
                max_connections: 10,
                acquire_timeout_secs: 30,
                run_migrations: false,
            }),
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }
}
