//! Declarative route guards.
//!
//! A [`RouteGuard`] decides whether protected content renders, using one
//! snapshot of the [`SessionContext`] per evaluation.
//!
//! # Decision Flow
//!
//! ```text
//! snapshot ─┬─ Loading ──────────────► Waiting
//!           ├─ Unauthenticated ──────► Redirect(login, replace)
//!           └─ Authenticated
//!                 │
//!                 ├─ require_admin?  ── fail ─┐
//!                 ├─ permission?     ── fail ─┼─► Redirect(redirect_to | fallback, replace)
//!                 ├─ permissions?    ── fail ─┘   (first failure wins)
//!                 │   (require_all ? all : any)
//!                 ▼
//!               Render
//! ```
//!
//! The guard keeps no decision state; call [`RouteGuard::evaluate`] again
//! whenever the props or the session change.

use crate::auth::{SessionContext, SnapshotGate};
use crate::config::RoutesConfig;
use permgate_auth::{AccessDenied, AccessRequirement, AuthState, PermissionGate, RequirementKeys};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Guard configuration attached to a protected route.
///
/// Deserializes from JSON or TOML with either snake_case or camelCase keys.
/// All requested requirements must pass.
///
/// # Example
///
/// ```
/// use permgate_runtime::guard::GuardProps;
///
/// let props: GuardProps = serde_json::from_value(serde_json::json!({
///     "permissions": ["vehicle_info", "data_cam_preparation"],
///     "requireAll": true,
/// }))
/// .unwrap();
///
/// assert!(props.require_all);
/// assert_eq!(props.requirements().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardProps {
    /// Single key that must be granted.
    pub permission: Option<String>,
    /// Key list checked with any/all semantics.
    pub permissions: Option<RequirementKeys>,
    /// Use all-of semantics for `permissions` instead of any-of.
    #[serde(alias = "requireAll")]
    pub require_all: bool,
    /// Require an administrator.
    #[serde(alias = "requireAdmin")]
    pub require_admin: bool,
    /// Redirect target on requirement failure; defaults to the fallback route.
    #[serde(alias = "redirectTo")]
    pub redirect_to: Option<String>,
}

impl GuardProps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn permission(mut self, key: impl Into<String>) -> Self {
        self.permission = Some(key.into());
        self
    }

    #[must_use]
    pub fn permissions(mut self, keys: impl Into<RequirementKeys>) -> Self {
        self.permissions = Some(keys.into());
        self
    }

    #[must_use]
    pub fn require_all(mut self) -> Self {
        self.require_all = true;
        self
    }

    #[must_use]
    pub fn require_admin(mut self) -> Self {
        self.require_admin = true;
        self
    }

    #[must_use]
    pub fn redirect_to(mut self, route: impl Into<String>) -> Self {
        self.redirect_to = Some(route.into());
        self
    }

    /// The requested requirements in evaluation order: admin, single, list.
    #[must_use]
    pub fn requirements(&self) -> Vec<AccessRequirement> {
        let mut out = Vec::with_capacity(3);
        if self.require_admin {
            out.push(AccessRequirement::RequireAdmin);
        }
        if let Some(key) = &self.permission {
            out.push(AccessRequirement::single(key.as_str()));
        }
        if let Some(keys) = &self.permissions {
            out.push(if self.require_all {
                AccessRequirement::all(keys.clone())
            } else {
                AccessRequirement::any(keys.clone())
            });
        }
        out
    }
}

/// A navigation the host should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Target route.
    pub to: String,
    /// Replace the current history entry instead of pushing.
    pub replace: bool,
    /// Why access was denied.
    pub reason: AccessDenied,
}

/// Result of one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Authentication is still resolving; show a neutral indicator.
    Waiting,
    /// Render the protected content.
    Render,
    /// Navigate away.
    Redirect(Redirect),
}

impl GuardOutcome {
    #[must_use]
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render)
    }

    /// The redirect, if this outcome is one.
    #[must_use]
    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Redirect(r) => Some(r),
            _ => None,
        }
    }
}

/// Route guard bound to a session context.
///
/// # Example
///
/// ```
/// use permgate_runtime::auth::SessionContext;
/// use permgate_runtime::config::RoutesConfig;
/// use permgate_runtime::guard::{GuardOutcome, GuardProps, RouteGuard};
/// use permgate_types::{PermissionGrant, Principal, PrincipalId};
/// use std::sync::Arc;
///
/// let ctx = Arc::new(SessionContext::authenticated(
///     Principal::new(PrincipalId::new("7"), "Planner")
///         .with_grants([PermissionGrant::granted("data_cam_preparation")]),
/// ));
/// let guard = RouteGuard::new(ctx, RoutesConfig::default());
///
/// let outcome = guard.evaluate(&GuardProps::new().permission("vehicle_info"));
/// assert_eq!(outcome.redirect().map(|r| r.to.as_str()), Some("/dashboard"));
///
/// assert_eq!(
///     guard.evaluate(&GuardProps::new().permission("data_cam_preparation")),
///     GuardOutcome::Render
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RouteGuard {
    context: Arc<SessionContext>,
    routes: RoutesConfig,
}

impl RouteGuard {
    #[must_use]
    pub fn new(context: Arc<SessionContext>, routes: RoutesConfig) -> Self {
        Self { context, routes }
    }

    /// Configured redirect targets.
    #[must_use]
    pub fn routes(&self) -> &RoutesConfig {
        &self.routes
    }

    /// Evaluates `props` against the current session snapshot.
    pub fn evaluate(&self, props: &GuardProps) -> GuardOutcome {
        let (state, session) = self.context.snapshot_with_id();

        match state.as_ref() {
            AuthState::Loading => {
                tracing::debug!("guard waiting for auth bootstrap");
                GuardOutcome::Waiting
            }
            AuthState::Unauthenticated => {
                tracing::debug!(to = %self.routes.login, "guard redirecting to login");
                GuardOutcome::Redirect(Redirect {
                    to: self.routes.login.clone(),
                    replace: true,
                    reason: AccessDenied::Unauthenticated,
                })
            }
            AuthState::Authenticated(_) => {
                let gate = SnapshotGate::new(&state, session);
                match props.requirements().into_iter().find(|req| !gate.check(req)) {
                    None => GuardOutcome::Render,
                    Some(failed) => {
                        let to = props
                            .redirect_to
                            .clone()
                            .unwrap_or_else(|| self.routes.fallback.clone());
                        tracing::info!(requirement = %failed, to = %to, "guard redirecting");
                        GuardOutcome::Redirect(Redirect {
                            to,
                            replace: true,
                            reason: AccessDenied::RequirementFailed(failed),
                        })
                    }
                }
            }
        }
    }
}
