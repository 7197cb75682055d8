//! Stored-session error types.

use permgate_auth::GateError;
use permgate_types::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a stored session.
///
/// The gate never sees these: loaders map every failure to
/// `AuthState::Unauthenticated`. They exist so callers and logs can tell
/// what went wrong.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error during file operations.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// JSON was valid but the principal payload was not.
    #[error(transparent)]
    Payload(#[from] GateError),
}

impl StorageError {
    /// Creates an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl ErrorCode for StorageError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "SESSION_IO",
            Self::Serialization(_) => "SESSION_SERIALIZATION",
            Self::Payload(_) => "SESSION_PAYLOAD",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permgate_types::assert_error_codes;

    #[test]
    fn io_error_names_path() {
        let err = StorageError::io(
            "/tmp/session.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/tmp/session.json"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn payload_error_is_transparent() {
        let err = StorageError::from(GateError::malformed("no id"));
        assert_eq!(err.to_string(), GateError::malformed("no id").to_string());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn codes_are_stable() {
        let json = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert_error_codes(
            &[
                StorageError::io("/x", std::io::Error::other("boom")),
                StorageError::from(json),
                StorageError::from(GateError::malformed("bad")),
            ],
            "SESSION_",
        );
    }
}
