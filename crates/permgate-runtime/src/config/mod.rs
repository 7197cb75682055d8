//! Configuration management with hierarchical layering.
//!
//! # Architecture
//!
//! Configuration is loaded from multiple sources with priority-based merging:
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌─────────────────────────────────────────────┐
//! │  1. Environment Variables (PERMGATE_*)      │  Runtime override
//! ├─────────────────────────────────────────────┤
//! │  2. Explicit file (--config <path>)         │  Invocation-specific
//! ├─────────────────────────────────────────────┤
//! │  3. Project Config (.permgate/config.toml)  │  Project-specific
//! ├─────────────────────────────────────────────┤
//! │  4. Global Config (~/.permgate/config.toml) │  User defaults
//! ├─────────────────────────────────────────────┤
//! │  5. Default Values (compile-time)           │  Fallback
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Config Field | Type |
//! |----------|--------------|------|
//! | `PERMGATE_DEBUG` | `debug` | bool |
//! | `PERMGATE_LOGIN_ROUTE` | `routes.login` | String |
//! | `PERMGATE_FALLBACK_ROUTE` | `routes.fallback` | String |
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.permgate/config.toml
//! debug = false
//!
//! [routes]
//! login = "/login"
//! fallback = "/dashboard"
//! ```

mod error;
mod loader;
mod resolver;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use resolver::ConfigResolver;
pub use types::{GateConfig, RoutesConfig, DEFAULT_FALLBACK_ROUTE, DEFAULT_LOGIN_ROUTE};

/// Default global config directory.
pub fn default_config_dir() -> std::path::PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".permgate")
}

/// Default global config file path.
pub fn default_config_path() -> std::path::PathBuf {
    default_config_dir().join("config.toml")
}

/// Project config directory name.
pub const PROJECT_CONFIG_DIR: &str = ".permgate";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "config.toml";
