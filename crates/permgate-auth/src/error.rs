//! Gate diagnostics and denial reasons.
//!
//! Neither type is ever returned from an access check. The evaluator
//! resolves every failure to `false`; these types exist so that the
//! failure can be named in logs and in guard redirects.
//!
//! ```text
//! GateError     : why a check could not look at real data (diagnostic)
//! AccessDenied  : why a guard redirected instead of rendering
//! ```

use crate::AccessRequirement;
use permgate_types::ErrorCode;
use thiserror::Error;

/// Conditions that degrade a check to "not granted".
///
/// # Example
///
/// ```
/// use permgate_auth::GateError;
/// use permgate_types::ErrorCode;
///
/// let err = GateError::malformed("permissions is not a list");
/// assert_eq!(err.code(), "GATE_MALFORMED_PERMISSION_DATA");
/// assert!(err.to_string().contains("not a list"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    /// No authenticated session is available.
    #[error("no authenticated principal")]
    NoPrincipal,

    /// Stored or received permission data could not be parsed.
    #[error("malformed permission data: {reason}")]
    MalformedPermissionData {
        /// What was wrong with the data.
        reason: String,
    },

    /// A key-list argument was not a sequence of strings.
    #[error("invalid requirement input: {reason}")]
    InvalidRequirementInput {
        /// What was wrong with the input.
        reason: String,
    },
}

impl GateError {
    /// Creates a [`GateError::MalformedPermissionData`].
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPermissionData {
            reason: reason.into(),
        }
    }

    /// Creates a [`GateError::InvalidRequirementInput`].
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidRequirementInput {
            reason: reason.into(),
        }
    }
}

impl ErrorCode for GateError {
    fn code(&self) -> &'static str {
        match self {
            Self::NoPrincipal => "GATE_NO_PRINCIPAL",
            Self::MalformedPermissionData { .. } => "GATE_MALFORMED_PERMISSION_DATA",
            Self::InvalidRequirementInput { .. } => "GATE_INVALID_REQUIREMENT_INPUT",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Logging in again replaces a missing or corrupt snapshot.
        matches!(
            self,
            Self::NoPrincipal | Self::MalformedPermissionData { .. }
        )
    }
}

/// Why a route guard redirected.
///
/// # Example
///
/// ```
/// use permgate_auth::{AccessDenied, AccessRequirement};
///
/// let denied = AccessDenied::RequirementFailed(AccessRequirement::RequireAdmin);
/// assert_eq!(denied.reason_str(), "requirement");
/// assert_eq!(denied.to_string(), "access denied: requires admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// No authenticated session; the guard sends the user to log in.
    #[error("access denied: not authenticated")]
    Unauthenticated,

    /// The first requirement that failed.
    #[error("access denied: requires {0}")]
    RequirementFailed(AccessRequirement),
}

impl AccessDenied {
    /// Returns "unauthenticated" or "requirement".
    #[must_use]
    pub fn reason_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::RequirementFailed(_) => "requirement",
        }
    }

    /// Returns the failed requirement, if any.
    #[must_use]
    pub fn requirement(&self) -> Option<&AccessRequirement> {
        match self {
            Self::RequirementFailed(req) => Some(req),
            Self::Unauthenticated => None,
        }
    }
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "GATE_UNAUTHENTICATED",
            Self::RequirementFailed(_) => "GATE_REQUIREMENT_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permgate_types::assert_error_codes;

    #[test]
    fn gate_error_codes() {
        assert_error_codes(
            &[
                GateError::NoPrincipal,
                GateError::malformed("x"),
                GateError::invalid_input("y"),
            ],
            "GATE_",
        );
    }

    #[test]
    fn gate_error_display() {
        assert_eq!(GateError::NoPrincipal.to_string(), "no authenticated principal");
        let err = GateError::invalid_input("permissions must be a list");
        assert!(err.to_string().contains("permissions must be a list"));
        assert!(!err.is_recoverable());
        assert!(GateError::NoPrincipal.is_recoverable());
    }

    #[test]
    fn access_denied_codes_and_reason() {
        let denied = AccessDenied::RequirementFailed(AccessRequirement::single("vehicle_info"));
        assert_error_codes(&[AccessDenied::Unauthenticated, denied.clone()], "GATE_");
        assert_eq!(denied.reason_str(), "requirement");
        assert_eq!(
            denied.requirement(),
            Some(&AccessRequirement::single("vehicle_info"))
        );
        assert!(AccessDenied::Unauthenticated.requirement().is_none());
        assert!(denied.to_string().contains("permission vehicle_info"));
    }
}
