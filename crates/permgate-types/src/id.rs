//! Identifier types for permgate.
//!
//! Principal identifiers are issued by the backend and treated as opaque
//! strings. Session identifiers are generated locally and are UUID-based.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for an authenticated principal.
///
/// The backend owns the identifier space. Numeric and string identifiers
/// are both carried as their string form so that comparisons are stable
/// regardless of how the backend encoded them.
///
/// # Example
///
/// ```
/// use permgate_types::PrincipalId;
///
/// let a = PrincipalId::new("42");
/// let b = PrincipalId::from(42_u64);
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Creates a [`PrincipalId`] from its backend representation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the backend supplied an empty identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<u64> for PrincipalId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for PrincipalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for one published session snapshot.
///
/// Every time a principal snapshot is published into a session context a
/// fresh [`SessionId`] is stamped on it. Audit log lines carry it so that
/// decisions can be attributed to the exact snapshot they were made against.
///
/// # Example
///
/// ```
/// use permgate_types::SessionId;
///
/// let a = SessionId::new();
/// let b = SessionId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

#[allow(clippy::new_without_default)] // a session id is always minted explicitly
impl SessionId {
    /// Creates a new [`SessionId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
