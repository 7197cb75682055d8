//! Core types for permgate.
//!
//! This crate holds the identity and permission data model shared by the
//! rest of the workspace. It has no decision logic and no I/O.
//!
//! # Crate Architecture
//!
//! ```text
//! permgate-types    : PrincipalId, SessionId, Principal, PermissionSet  ◄── HERE
//!        ↑
//! permgate-auth     : AccessRequirement, AuthState, evaluator, PermissionGate
//!        ↑
//! permgate-runtime  : SessionContext, DefaultGate, RouteGuard, config
//!        ↑
//! permgate-cli      : `permgate` binary
//! ```
//!
//! # Example
//!
//! ```
//! use permgate_types::{PermissionGrant, Principal, PrincipalId};
//!
//! let principal = Principal::new(PrincipalId::new("7"), "Planner").with_grants([
//!     PermissionGrant::granted("data_cam_preparation"),
//!     PermissionGrant::new("vehicle_info", "0"),
//! ]);
//!
//! assert!(principal.permissions.is_granted("data_cam_preparation"));
//! assert!(!principal.permissions.is_granted("vehicle_info"));
//! ```

mod error;
mod grant;
mod id;
mod principal;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use grant::{PermissionGrant, PermissionSet, GRANTED_VALUE};
pub use id::{PrincipalId, SessionId};
pub use principal::Principal;
