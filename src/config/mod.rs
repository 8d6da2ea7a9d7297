//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `SNAP_COMPONENT` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use snap_component::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//!
//! println!("Server running on {}", config.server.socket_addr()?);
//! # Ok(())
//! # }
//! ```

mod ai;
mod auth;
mod database;
mod error;
mod payment;
mod server;
mod storage;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Host, port, environment and app URL
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// Session token validation
    pub auth: AuthConfig,

    /// OpenAI vision model
    #[serde(default)]
    pub ai: AiConfig,

    /// Stripe checkout and webhooks
    pub payment: PaymentConfig,

    /// Uploaded screenshots
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present (development)
    /// 2. Reads variables with the `SNAP_COMPONENT` prefix
    /// 3. Splits nested keys on `__`
    ///
    /// `SNAP_COMPONENT__SERVER__PORT=8080` sets `server.port`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values do
    /// not parse.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SNAP_COMPONENT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.ai.validate()?;
        self.payment.validate()?;
        self.storage.validate()?;
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
    use std::sync::Mutex;

    // Environment variables are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const MINIMAL_ENV: &[(&str, &str)] = &[
        ("SNAP_COMPONENT__DATABASE__URL", "postgresql://test@localhost/snap"),
        ("SNAP_COMPONENT__AUTH__JWT_SECRET", "0123456789abcdef0123456789abcdef"),
        ("SNAP_COMPONENT__AUTH__ISSUER", "https://auth.example.com"),
        ("SNAP_COMPONENT__AUTH__AUDIENCE", "snap-component"),
        ("SNAP_COMPONENT__AI__OPENAI_API_KEY", "sk-test"),
        ("SNAP_COMPONENT__PAYMENT__STRIPE_API_KEY", "sk_test_xxx"),
        ("SNAP_COMPONENT__PAYMENT__STRIPE_WEBHOOK_SECRET", "whsec_xxx"),
        ("SNAP_COMPONENT__PAYMENT__STRIPE_PRO_PRICE_ID", "price_pro"),
    ];

    const OPTIONAL_ENV: &[&str] = &[
        "SNAP_COMPONENT__SERVER__PORT",
        "SNAP_COMPONENT__SERVER__ENVIRONMENT",
        "SNAP_COMPONENT__SERVER__APP_URL",
    ];

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        for (key, value) in MINIMAL_ENV.iter().chain(extra) {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        for (key, _) in MINIMAL_ENV {
            env::remove_var(key);
        }
        for key in OPTIONAL_ENV {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn loads_from_environment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/snap");
        assert_eq!(config.auth.audience, "snap-component");
        assert_eq!(config.payment.stripe_pro_price_id, "price_pro");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unset_sections_use_defaults() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.server.app_url, "http://localhost:3000");
        assert_eq!(config.ai.model, "gpt-4o");
        assert_eq!(config.storage.max_upload_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn overrides_nested_values() {
        let config = load_with(&[
            ("SNAP_COMPONENT__SERVER__PORT", "3001"),
            ("SNAP_COMPONENT__SERVER__ENVIRONMENT", "production"),
            ("SNAP_COMPONENT__SERVER__APP_URL", "https://snapcomponent.com"),
        ])
        .unwrap();
        assert_eq!(config.server.port, 3001);
        assert!(config.is_production());
        assert_eq!(config.server.app_url, "https://snapcomponent.com");
    }
}
