//! Application configuration schemas.
//!
//! Configuration is merged from TOML files and `WARDEN__`-prefixed
//! environment variables via the `config` crate. The resulting
//! [`AppConfig`] is built once at startup and shared read-only.

pub mod app;
pub mod auth;
pub mod logging;
pub mod password;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::app::ServerConfig;
pub use self::auth::{AuthConfig, StrategyKind};
pub use self::logging::LoggingConfig;
pub use self::password::PasswordConfig;
pub use self::store::{MemoryStoreConfig, RedisStoreConfig, StoreConfig};

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Password policy.
    #[serde(default)]
    pub password: PasswordConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files and the environment.
    ///
    /// Merges `config/default`, then `config/{env}`, then environment
    /// variables prefixed with `WARDEN` (e.g. `WARDEN__AUTH__SECRET_KEY`).
    /// The merged result is validated before it is returned.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("WARDEN")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("auth.subject_kinds")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate every section that carries invariants.
    pub fn validate(&self) -> Result<(), AppError> {
        self.auth.validate()?;
        if self.password.min_score > 4 {
            return Err(AppError::configuration(
                "password.min_score must be between 0 and 4",
            ));
        }
        Ok(())
    }
}
