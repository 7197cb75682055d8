//! Session state and audited gates.
//!
//! Pure decision logic ([`AccessRequirement`], [`AuthState`], the evaluator)
//! lives in `permgate-auth`. This module adds the runtime pieces:
//!
//! - [`SessionContext`]: injectable, atomically replaced auth state
//! - [`DefaultGate`] / [`SnapshotGate`]: [`PermissionGate`] with audit logging
//! - [`principal_from_value`]: payload validation at the auth boundary
//!
//! # Architecture
//!
//! ```text
//! permgate-auth (data types + evaluator)
//!     AuthState, AccessRequirement, PermissionGate, GateError
//!         ↓
//! permgate-runtime/auth (implementations)
//!     SessionContext, DefaultGate, SnapshotGate, principal_from_value
//! ```

mod boundary;
mod context;
mod gate;

pub use boundary::{normalize_principal, principal_from_value, NormalizeReport};
pub use context::{BootstrapApplied, BootstrapOutcome, BootstrapTicket, SessionContext};
pub use gate::{DefaultGate, SnapshotGate};

pub use permgate_auth::{
    AccessDenied, AccessRequirement, AuthState, GateError, PermissionGate, RequirementKeys,
};
pub use permgate_types::Principal;
