//! Stored session snapshots.
//!
//! The authentication layer persists the last known principal so a page
//! reload can bootstrap without a round trip. Two document shapes are read:
//!
//! ```json
//! { "principal": { "id": 7, "displayName": "Planner", "permissions": [...] } }
//! { "id": 7, "displayName": "Planner", "permissions": [...] }
//! ```
//!
//! `null`, `{}`, empty content and `{ "principal": null }` mean logged out.
//! Anything that cannot be read or validated also yields
//! `AuthState::Unauthenticated`, after a single warning.
//!
//! # Example
//!
//! ```
//! use permgate_runtime::session::load_state_from_str;
//!
//! let state = load_state_from_str(r#"{"principal": {"id": "7", "isAdmin": true}}"#);
//! assert!(state.principal().is_some_and(|p| p.is_admin));
//!
//! assert!(load_state_from_str("{ truncated").is_unauthenticated());
//! ```

mod error;
mod store;

pub use error::StorageError;
pub use store::{
    load_state_from_file, load_state_from_str, parse_stored_session, restore_session, save_session,
};
