//! permgate runtime: session state, audited gates and route guards.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Decision Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  permgate-types : PrincipalId, Principal, PermissionSet     │
//! │  permgate-auth  : AccessRequirement, AuthState, evaluate    │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Runtime Layer (THIS CRATE)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  auth/    : SessionContext, DefaultGate, payload validation │
//! │  guard    : RouteGuard, GuardProps, GuardOutcome            │
//! │  session/ : stored session snapshots                        │
//! │  config/  : GateConfig, ConfigLoader                        │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Frontend Layer                             │
//! │  (permgate-cli)                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! ## [`auth`] - Session State & Gates
//!
//! - [`SessionContext`](auth::SessionContext): injectable auth state with
//!   last-write-wins bootstrap sequencing
//! - [`DefaultGate`](auth::DefaultGate): audited [`PermissionGate`](auth::PermissionGate)
//!   for UI affordance checks
//! - [`principal_from_value`](auth::principal_from_value): validates backend payloads
//!
//! ## [`guard`] - Route Guards
//!
//! - [`RouteGuard`](guard::RouteGuard): Waiting / Render / Redirect decisions
//! - [`GuardProps`](guard::GuardProps): the five declarative knobs
//!
//! ## [`session`] - Stored Sessions
//!
//! Fail-closed loading of the persisted principal snapshot.
//!
//! ## [`config`] - Configuration Management
//!
//! Layered TOML configuration (login and fallback routes, debug flag).

pub mod auth;
pub mod config;
pub mod guard;
pub mod session;

pub use auth::{DefaultGate, SessionContext};
pub use config::{ConfigLoader, GateConfig};
pub use guard::{GuardOutcome, GuardProps, Redirect, RouteGuard};
