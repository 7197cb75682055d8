//! Configuration errors.

use permgate_types::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar { name: String, message: String },

    /// A configured route is not an absolute path.
    #[error("invalid route for '{field}': {value:?} must start with '/'")]
    InvalidRoute { field: &'static str, value: String },
}

impl ConfigError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse TOML error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid env var error.
    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid route error.
    pub fn invalid_route(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidRoute {
            field,
            value: value.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::ParseToml { .. } => "CONFIG_PARSE_TOML",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
            Self::InvalidRoute { .. } => "CONFIG_INVALID_ROUTE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permgate_types::assert_error_codes;

    #[test]
    fn error_display() {
        let err = ConfigError::invalid_env_var("PERMGATE_DEBUG", "expected bool");
        assert!(err.to_string().contains("PERMGATE_DEBUG"));
        assert!(err.to_string().contains("expected bool"));
    }

    #[test]
    fn invalid_route_display() {
        let err = ConfigError::invalid_route("routes.login", "login");
        assert_eq!(
            err.to_string(),
            "invalid route for 'routes.login': \"login\" must start with '/'"
        );
    }

    #[test]
    fn codes_are_stable() {
        let io = || std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let parse = toml::from_str::<toml::Table>("= broken").expect_err("invalid toml");

        assert_error_codes(
            &[
                ConfigError::read_file("/x", io()),
                ConfigError::parse_toml("/x", parse),
                ConfigError::invalid_env_var("PERMGATE_DEBUG", "expected bool"),
                ConfigError::invalid_route("routes.fallback", "home"),
            ],
            "CONFIG_",
        );
    }
}
