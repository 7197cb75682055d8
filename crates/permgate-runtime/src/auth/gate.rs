//! Audit-logged permission gates.
//!
//! - [`SnapshotGate`]: evaluates against one fixed [`AuthState`] snapshot
//! - [`DefaultGate`]: reads the latest snapshot from a [`SessionContext`]
//!   on every call, then delegates to a [`SnapshotGate`]
//!
//! Both implement [`PermissionGate`] with exactly the semantics of
//! [`permgate_auth::evaluate`]; the only addition is logging.
//!
//! # Audit Logging
//!
//! | Event | Level |
//! |-------|-------|
//! | allowed | debug |
//! | denied | info |
//! | no principal | debug (`GATE_NO_PRINCIPAL`) |
//! | invalid key-list input | warn (`GATE_INVALID_REQUIREMENT_INPUT`) |
//!
//! Logging never changes a result.

use super::SessionContext;
use permgate_auth::{evaluate, AuthState, GateError, PermissionGate, RequirementKeys};
use permgate_types::{ErrorCode, SessionId};
use std::sync::Arc;

/// Gate over a fixed snapshot.
///
/// Route guards use this so that every requirement of one evaluation sees
/// the same principal, even if the context is replaced meanwhile.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotGate<'a> {
    state: &'a AuthState,
    session: Option<SessionId>,
}

impl<'a> SnapshotGate<'a> {
    /// Wraps a snapshot. `session` is only used to tag log lines.
    #[must_use]
    pub fn new(state: &'a AuthState, session: Option<SessionId>) -> Self {
        Self { state, session }
    }

    /// The snapshot being evaluated.
    #[must_use]
    pub fn state(&self) -> &'a AuthState {
        self.state
    }

    /// The taxonomy error behind a denial, if it was not an ordinary miss.
    ///
    /// `NoPrincipal` when there is no session, `InvalidRequirementInput`
    /// when a non-admin is checked against a non-list key input.
    #[must_use]
    pub fn denial_cause(&self, keys: Option<&RequirementKeys>) -> Option<GateError> {
        let Some(principal) = self.state.principal() else {
            return Some(GateError::NoPrincipal);
        };
        match keys {
            Some(keys) if keys.is_invalid() && !principal.is_admin => Some(
                GateError::invalid_input("key-list input is not a sequence of strings"),
            ),
            _ => None,
        }
    }

    fn audit(&self, check: &'static str, subject: &dyn std::fmt::Display, allowed: bool) -> bool {
        let Some(principal) = self.state.principal() else {
            let err = GateError::NoPrincipal;
            tracing::debug!(
                check,
                subject = %subject,
                status = self.state.status_str(),
                code = err.code(),
                "access denied: {err}"
            );
            return allowed;
        };

        if allowed {
            tracing::debug!(
                principal = %principal.id,
                admin = principal.is_admin,
                session = ?self.session,
                check,
                subject = %subject,
                "access allowed"
            );
        } else {
            tracing::info!(
                principal = %principal.id,
                session = ?self.session,
                check,
                subject = %subject,
                "access denied"
            );
        }
        allowed
    }

    fn audit_keys(&self, check: &'static str, keys: &RequirementKeys, allowed: bool) -> bool {
        if !allowed {
            match self.denial_cause(Some(keys)) {
                Some(err @ GateError::InvalidRequirementInput { .. }) => {
                    tracing::warn!(check, code = err.code(), "{err}");
                }
                _ => {
                    if let Some(principal) = self.state.principal() {
                        let missing = evaluate::missing_keys(Some(principal), keys);
                        tracing::debug!(principal = %principal.id, check, ?missing, "missing keys");
                    }
                }
            }
        }
        self.audit(check, keys, allowed)
    }
}

impl PermissionGate for SnapshotGate<'_> {
    fn is_admin(&self) -> bool {
        let allowed = evaluate::is_admin(self.state.principal());
        self.audit("is_admin", &"admin", allowed)
    }

    fn has_permission(&self, key: &str) -> bool {
        let allowed = evaluate::has_permission(self.state.principal(), key);
        self.audit("has_permission", &key, allowed)
    }

    fn has_any_permission(&self, keys: &RequirementKeys) -> bool {
        let allowed = evaluate::has_any_permission(self.state.principal(), keys);
        self.audit_keys("has_any_permission", keys, allowed)
    }

    fn has_all_permissions(&self, keys: &RequirementKeys) -> bool {
        let allowed = evaluate::has_all_permissions(self.state.principal(), keys);
        self.audit_keys("has_all_permissions", keys, allowed)
    }
}

/// Gate over a live session context.
///
/// This is what UI affordance checks hold on to. Each call reads the
/// current snapshot, so a logout is visible to the very next check.
///
/// # Example
///
/// ```
/// use permgate_auth::{PermissionGate, RequirementKeys};
/// use permgate_runtime::auth::{DefaultGate, SessionContext};
/// use permgate_types::{PermissionGrant, Principal, PrincipalId};
/// use std::sync::Arc;
///
/// let ctx = Arc::new(SessionContext::authenticated(
///     Principal::new(PrincipalId::new("7"), "Planner")
///         .with_grants([PermissionGrant::granted("data_cam_preparation")]),
/// ));
/// let gate = DefaultGate::new(Arc::clone(&ctx));
///
/// assert!(gate.has_permission("data_cam_preparation"));
/// assert!(!gate.has_all_permissions(&RequirementKeys::from(["vehicle_info", "data_cam_preparation"])));
///
/// ctx.logout();
/// assert!(!gate.has_permission("data_cam_preparation"));
/// ```
#[derive(Debug, Clone)]
pub struct DefaultGate {
    context: Arc<SessionContext>,
}

impl DefaultGate {
    #[must_use]
    pub fn new(context: Arc<SessionContext>) -> Self {
        Self { context }
    }

    /// The context this gate reads from.
    #[must_use]
    pub fn context(&self) -> &Arc<SessionContext> {
        &self.context
    }

    fn with_snapshot<R>(&self, f: impl FnOnce(SnapshotGate<'_>) -> R) -> R {
        let (state, session) = self.context.snapshot_with_id();
        f(SnapshotGate::new(&state, session))
    }
}

impl PermissionGate for DefaultGate {
    fn is_admin(&self) -> bool {
        self.with_snapshot(|gate| gate.is_admin())
    }

    fn has_permission(&self, key: &str) -> bool {
        self.with_snapshot(|gate| gate.has_permission(key))
    }

    fn has_any_permission(&self, keys: &RequirementKeys) -> bool {
        self.with_snapshot(|gate| gate.has_any_permission(keys))
    }

    fn has_all_permissions(&self, keys: &RequirementKeys) -> bool {
        self.with_snapshot(|gate| gate.has_all_permissions(keys))
    }
}
