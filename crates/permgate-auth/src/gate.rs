//! Permission gate trait.
//!
//! Defines [`PermissionGate`], the four-operation interface every route
//! guard and UI affordance check goes through. The trait lives here so that
//! both the runtime (audit-logged gate over a live session context) and
//! tests can implement it without depending on each other.
//!
//! # Architecture
//!
//! ```text
//! PermissionGate trait (permgate-auth)   <- abstract, no I/O
//!          │
//!          ├── AuthState (permgate-auth)    <- pure gate over a fixed snapshot
//!          │
//!          └── DefaultGate (permgate-runtime) <- reads SessionContext, logs decisions
//! ```

use crate::{evaluate, AccessRequirement, AuthState, RequirementKeys};

/// Access checks against "the current principal".
///
/// Implementations decide where the current principal comes from; the
/// semantics of the four operations are fixed by [`evaluate`] and must not
/// be re-derived. All operations are total and fail closed.
///
/// # Implementors
///
/// - [`AuthState`]: evaluates against the snapshot it holds
/// - `DefaultGate` (in `permgate-runtime`): reads the latest snapshot from a
///   `SessionContext` on every call and emits audit logs
///
/// # Example
///
/// ```
/// use permgate_auth::{AccessRequirement, AuthState, PermissionGate, RequirementKeys};
/// use permgate_types::{PermissionGrant, Principal, PrincipalId};
///
/// let gate = AuthState::authenticated(
///     Principal::new(PrincipalId::new("7"), "Planner")
///         .with_grants([PermissionGrant::granted("data_cam_preparation")]),
/// );
///
/// assert!(gate.has_permission("data_cam_preparation"));
/// assert!(gate.has_any_permission(&RequirementKeys::from(["vehicle_info", "data_cam_preparation"])));
/// assert!(!gate.check(&AccessRequirement::RequireAdmin));
/// ```
pub trait PermissionGate {
    /// Returns `true` iff the current principal is an administrator.
    fn is_admin(&self) -> bool;

    /// Returns `true` iff admin or `key` is granted.
    fn has_permission(&self, key: &str) -> bool;

    /// Returns `true` iff admin or any key is granted. Empty/invalid input
    /// is denied for non-admins.
    fn has_any_permission(&self, keys: &RequirementKeys) -> bool;

    /// Returns `true` iff admin or every key is granted. Empty/invalid input
    /// is denied for non-admins.
    fn has_all_permissions(&self, keys: &RequirementKeys) -> bool;

    /// Evaluates a declarative requirement through the four operations.
    fn check(&self, requirement: &AccessRequirement) -> bool {
        match requirement {
            AccessRequirement::RequireAdmin => self.is_admin(),
            AccessRequirement::RequireSingle(key) => self.has_permission(key),
            AccessRequirement::RequireAny(keys) => self.has_any_permission(keys),
            AccessRequirement::RequireAll(keys) => self.has_all_permissions(keys),
        }
    }
}

impl PermissionGate for AuthState {
    fn is_admin(&self) -> bool {
        evaluate::is_admin(self.principal())
    }

    fn has_permission(&self, key: &str) -> bool {
        evaluate::has_permission(self.principal(), key)
    }

    fn has_any_permission(&self, keys: &RequirementKeys) -> bool {
        evaluate::has_any_permission(self.principal(), keys)
    }

    fn has_all_permissions(&self, keys: &RequirementKeys) -> bool {
        evaluate::has_all_permissions(self.principal(), keys)
    }
}

impl<G: PermissionGate + ?Sized> PermissionGate for &G {
    fn is_admin(&self) -> bool {
        (**self).is_admin()
    }

    fn has_permission(&self, key: &str) -> bool {
        (**self).has_permission(key)
    }

    fn has_any_permission(&self, keys: &RequirementKeys) -> bool {
        (**self).has_any_permission(keys)
    }

    fn has_all_permissions(&self, keys: &RequirementKeys) -> bool {
        (**self).has_all_permissions(keys)
    }
}
