//! Reading and writing the persisted session snapshot.

use super::StorageError;
use crate::auth::{principal_from_value, BootstrapApplied, BootstrapOutcome, SessionContext};
use permgate_auth::AuthState;
use permgate_types::{ErrorCode, Principal};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Key of the envelope form `{ "principal": ... }`.
const PRINCIPAL_KEY: &str = "principal";

#[derive(Serialize)]
struct Envelope<'a> {
    principal: Option<&'a Principal>,
}

/// Parses stored session content.
///
/// Returns `Ok(None)` for a logged-out document: empty content, `null`,
/// `{}`, or an envelope whose `principal` is `null`.
///
/// # Errors
///
/// Returns [`StorageError::Serialization`] for invalid JSON and
/// [`StorageError::Payload`] when the principal payload is rejected.
pub fn parse_stored_session(content: &str) -> Result<Option<Principal>, StorageError> {
    if content.trim().is_empty() {
        return Ok(None);
    }

    let doc: Value = serde_json::from_str(content)?;
    let payload = match &doc {
        Value::Null => return Ok(None),
        Value::Object(obj) if obj.is_empty() => return Ok(None),
        Value::Object(obj) if obj.contains_key(PRINCIPAL_KEY) => &obj[PRINCIPAL_KEY],
        other => other,
    };

    if payload.is_null() {
        return Ok(None);
    }
    Ok(Some(principal_from_value(payload)?))
}

/// Loads an [`AuthState`] from stored session content.
///
/// Fails closed: anything unparseable becomes `Unauthenticated`, with one
/// warning logged.
#[must_use]
pub fn load_state_from_str(content: &str) -> AuthState {
    match parse_stored_session(content) {
        Ok(Some(principal)) => AuthState::authenticated(principal),
        Ok(None) => AuthState::Unauthenticated,
        Err(e) => {
            warn_unusable(&e, None);
            AuthState::Unauthenticated
        }
    }
}

/// Loads an [`AuthState`] from a stored session file.
///
/// A missing or unreadable file is treated like corrupt content.
#[must_use]
pub fn load_state_from_file(path: &Path) -> AuthState {
    match read_file(path).and_then(|content| parse_stored_session(&content)) {
        Ok(Some(principal)) => AuthState::authenticated(principal),
        Ok(None) => AuthState::Unauthenticated,
        Err(e) => {
            warn_unusable(&e, Some(path));
            AuthState::Unauthenticated
        }
    }
}

/// Runs a full bootstrap of `ctx` from a stored session file.
pub fn restore_session(ctx: &SessionContext, path: &Path) -> BootstrapApplied {
    let ticket = ctx.begin_bootstrap();
    let outcome = match load_state_from_file(path) {
        AuthState::Authenticated(principal) => {
            BootstrapOutcome::Authenticated(Arc::unwrap_or_clone(principal))
        }
        _ => BootstrapOutcome::Unauthenticated,
    };
    ctx.complete_bootstrap(ticket, outcome)
}

/// Writes a session snapshot in envelope form. `None` stores a logout.
///
/// # Errors
///
/// Returns [`StorageError`] if serialization or the write fails.
pub fn save_session(path: &Path, principal: Option<&Principal>) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(&Envelope { principal })?;
    std::fs::write(path, json).map_err(|e| StorageError::io(path, e))
}

fn read_file(path: &Path) -> Result<String, StorageError> {
    std::fs::read_to_string(path).map_err(|e| StorageError::io(path, e))
}

fn warn_unusable(err: &StorageError, path: Option<&Path>) {
    tracing::warn!(
        code = err.code(),
        path = ?path,
        error = %err,
        "stored session unusable, treating as logged out"
    );
}
