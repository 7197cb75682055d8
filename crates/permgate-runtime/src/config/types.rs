//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Route an unauthenticated visitor is sent to.
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

/// Route an authenticated visitor is sent to when a requirement fails.
pub const DEFAULT_FALLBACK_ROUTE: &str = "/dashboard";

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use permgate_runtime::config::GateConfig;
///
/// let config = GateConfig::default();
/// assert!(!config.debug);
/// assert_eq!(config.routes.login, "/login");
/// assert_eq!(config.routes.fallback, "/dashboard");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GateConfig {
    /// Enable debug logging.
    pub debug: bool,

    /// Redirect targets used by route guards.
    pub routes: RoutesConfig,
}

impl GateConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if deserialization fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Merges another config into this one.
    ///
    /// Values from `other` override values in `self` only if they
    /// differ from the default. A later layer therefore cannot reset a
    /// value back to its default (`debug = false`, `fallback = "/dashboard"`)
    /// once an earlier layer changed it; environment variables and CLI
    /// flags, which assign directly, can.
    pub fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.debug != default.debug {
            self.debug = other.debug;
        }

        self.routes.merge(&other.routes);
    }

    /// Checks values that cannot be expressed in the type.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRoute`] if a route is not an absolute path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.routes.validate()
    }
}

/// Redirect targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoutesConfig {
    /// Where unauthenticated visitors go.
    pub login: String,

    /// Where authenticated visitors go when a requirement fails and the
    /// guard has no `redirect_to` of its own.
    pub fallback: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN_ROUTE.into(),
            fallback: DEFAULT_FALLBACK_ROUTE.into(),
        }
    }
}

impl RoutesConfig {
    fn merge(&mut self, other: &Self) {
        let default = Self::default();

        if other.login != default.login {
            self.login = other.login.clone();
        }
        if other.fallback != default.fallback {
            self.fallback = other.fallback.clone();
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("routes.login", &self.login), ("routes.fallback", &self.fallback)] {
            if !value.starts_with('/') {
                return Err(ConfigError::invalid_route(field, value.as_str()));
            }
        }
        Ok(())
    }
}
