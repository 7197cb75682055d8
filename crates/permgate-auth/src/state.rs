//! Authentication state as seen by the gate.

use permgate_types::Principal;
use std::sync::Arc;

/// Authentication status plus the principal snapshot, if any.
///
/// ```text
/// Loading ──► Authenticated(principal)
///    │
///    └──────► Unauthenticated
/// ```
///
/// The principal is held in an [`Arc`] and is never mutated in place: a
/// re-authentication publishes a new state with a new snapshot, so any
/// evaluation already holding the old `Arc` keeps a consistent view.
///
/// There is deliberately no `Default`. Callers state the initial status.
///
/// # Example
///
/// ```
/// use permgate_auth::AuthState;
/// use permgate_types::{Principal, PrincipalId};
///
/// let state = AuthState::authenticated(Principal::new(PrincipalId::new("1"), "A"));
/// assert!(state.is_authenticated());
/// assert_eq!(state.status_str(), "authenticated");
///
/// assert!(AuthState::Loading.principal().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Bootstrap in flight; no access decision can be made yet.
    Loading,
    /// A principal snapshot is available.
    Authenticated(Arc<Principal>),
    /// No session (never logged in, logged out, or session invalidated).
    Unauthenticated,
}

impl AuthState {
    /// Wraps a principal into an `Authenticated` state.
    #[must_use]
    pub fn authenticated(principal: Principal) -> Self {
        Self::Authenticated(Arc::new(principal))
    }

    /// Returns the principal snapshot, if authenticated.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Self::Authenticated(principal) => Some(principal),
            Self::Loading | Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Returns "loading", "authenticated" or "unauthenticated".
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Authenticated(_) => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authenticated(principal) => write!(f, "authenticated({principal})"),
            other => f.write_str(other.status_str()),
        }
    }
}
