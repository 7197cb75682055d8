//! Permission gate primitives for permgate.
//!
//! This crate answers one question: is the current principal allowed to see
//! or do X, given a pre-fetched permission set. It performs no I/O.
//!
//! # Decision Model
//!
//! ```text
//! allowed = principal.is_admin
//!        || requirement satisfied by principal.permissions (value == "1")
//! ```
//!
//! | Requirement | Non-admin passes when |
//! |-------------|-----------------------|
//! | `RequireAdmin` | never |
//! | `RequireSingle(k)` | `k` granted |
//! | `RequireAny(ks)` | `ks` non-empty and some key granted |
//! | `RequireAll(ks)` | `ks` non-empty and every key granted |
//!
//! # Crate Architecture
//!
//! ```text
//! permgate-types  (PrincipalId, Principal, PermissionSet)
//!       ↑
//! permgate-auth  ◄── THIS CRATE
//! (AccessRequirement, AuthState, evaluate, PermissionGate, GateError)
//!       ↑
//! permgate-runtime (SessionContext, DefaultGate, RouteGuard)
//! ```
//!
//! # Design Principles
//!
//! - **Fail closed**: no principal, corrupt data and invalid input all deny
//! - **Admin wins**: an administrator satisfies every requirement
//! - **One evaluator**: route guards and UI checks share [`evaluate`]

pub mod error;
pub mod evaluate;
pub mod gate;
pub mod requirement;
pub mod state;

pub use error::{AccessDenied, GateError};
pub use gate::PermissionGate;
pub use requirement::{AccessRequirement, RequirementKeys, INVALID_KEYS_MARKER};
pub use state::AuthState;

pub use permgate_types::Principal;
