//! Principal payload validation at the authentication boundary.
//!
//! The backend hands over a loosely shaped JSON record after login:
//!
//! ```json
//! { "id": 7, "displayName": "Planner", "isAdmin": false,
//!   "permissions": [ { "key": "data_cam_preparation", "value": "1" } ] }
//! ```
//!
//! [`principal_from_value`] turns it into a typed [`Principal`] before it can
//! reach the evaluator. Individual bad permission entries are normalized or
//! dropped (fail closed); only a payload that is not an object, or has no
//! usable `id`, is rejected outright.
//!
//! # Normalization
//!
//! | Field | Accepted | Otherwise |
//! |-------|----------|-----------|
//! | `id` | string, integer | rejected |
//! | `displayName` / `display_name` | string | empty |
//! | `isAdmin` / `is_admin` | `true`, `1`, `"1"`, `"true"` | `false` |
//! | `permissions` | array | empty set |
//! | entry `key` | non-empty string | entry dropped |
//! | entry `value` | string, number (stringified) | `""` (not granted) |

use permgate_auth::GateError;
use permgate_types::{ErrorCode, PermissionGrant, PermissionSet, Principal, PrincipalId};
use serde_json::{Map, Value};

/// Counts of what normalization had to fix in one payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Entries removed because they had no usable key.
    pub dropped_entries: usize,
    /// Entries kept with a value coerced to a string (or blanked).
    pub coerced_values: usize,
    /// `permissions` was present but not an array.
    pub permissions_not_list: bool,
}

impl NormalizeReport {
    /// Returns `true` if the payload needed no fixing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    /// Describes what was fixed as a [`GateError::MalformedPermissionData`].
    ///
    /// `None` for a clean payload.
    #[must_use]
    pub fn to_error(&self) -> Option<GateError> {
        if self.is_clean() {
            return None;
        }
        Some(GateError::malformed(format!(
            "{} entries dropped, {} values coerced{}",
            self.dropped_entries,
            self.coerced_values,
            if self.permissions_not_list {
                ", permissions not a list"
            } else {
                ""
            }
        )))
    }
}

/// Validates a principal payload, logging one warning if anything was fixed.
///
/// # Errors
///
/// Returns [`GateError::MalformedPermissionData`] if the payload is not an
/// object or lacks a string/integer `id`.
///
/// # Example
///
/// ```
/// use permgate_runtime::auth::principal_from_value;
///
/// let principal = principal_from_value(&serde_json::json!({
///     "id": 7,
///     "displayName": "Planner",
///     "isAdmin": "0",
///     "permissions": [
///         { "key": "data_cam_preparation", "value": "1" },
///         { "value": "1" },
///     ],
/// }))
/// .unwrap();
///
/// assert_eq!(principal.id.as_str(), "7");
/// assert!(!principal.is_admin);
/// assert_eq!(principal.permissions.len(), 1);
/// ```
pub fn principal_from_value(payload: &Value) -> Result<Principal, GateError> {
    let (principal, report) = normalize_principal(payload)?;
    if let Some(err) = report.to_error() {
        tracing::warn!(
            principal = %principal.id,
            code = err.code(),
            error = %err,
            dropped = report.dropped_entries,
            coerced = report.coerced_values,
            permissions_not_list = report.permissions_not_list,
            "normalized malformed principal payload"
        );
    }
    Ok(principal)
}

/// Validates a principal payload and reports what was normalized.
///
/// # Errors
///
/// Same as [`principal_from_value`].
pub fn normalize_principal(payload: &Value) -> Result<(Principal, NormalizeReport), GateError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| GateError::malformed("principal payload is not an object"))?;

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.is_empty() => PrincipalId::new(s.as_str()),
        Some(Value::Number(n)) if n.is_u64() || n.is_i64() => PrincipalId::new(n.to_string()),
        _ => return Err(GateError::malformed("principal payload has no usable id")),
    };

    let display_name = field(obj, "displayName", "display_name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let is_admin = field(obj, "isAdmin", "is_admin").is_some_and(is_truthy_flag);

    let mut report = NormalizeReport::default();
    let permissions = match obj.get("permissions") {
        None | Some(Value::Null) => PermissionSet::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| normalize_grant(entry, &mut report))
            .collect(),
        Some(_) => {
            report.permissions_not_list = true;
            PermissionSet::new()
        }
    };

    let principal = Principal {
        id,
        display_name,
        is_admin,
        permissions,
    };
    Ok((principal, report))
}

fn field<'a>(obj: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    obj.get(camel).or_else(|| obj.get(snake))
}

/// Admin flag coercion. Anything unrecognized is `false`.
fn is_truthy_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64() == Some(1),
        Value::String(s) => s == "1" || s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn normalize_grant(entry: &Value, report: &mut NormalizeReport) -> Option<PermissionGrant> {
    let Some(key) = entry
        .get("key")
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
    else {
        report.dropped_entries += 1;
        return None;
    };

    let value = match entry.get("value") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => {
            report.coerced_values += 1;
            n.to_string()
        }
        _ => {
            report.coerced_values += 1;
            String::new()
        }
    };

    Some(PermissionGrant::new(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clean_payload() {
        let (p, report) = normalize_principal(&json!({
            "id": "u-7",
            "displayName": "Planner",
            "isAdmin": false,
            "permissions": [
                {"key": "data_cam_preparation", "value": "1"},
                {"key": "vehicle_info", "value": "0"},
            ],
        }))
        .expect("valid payload");

        assert!(report.is_clean());
        assert_eq!(p.id.as_str(), "u-7");
        assert_eq!(p.display_name, "Planner");
        assert!(p.permissions.is_granted("data_cam_preparation"));
        assert!(!p.permissions.is_granted("vehicle_info"));
    }

    #[test]
    fn numeric_id_and_snake_case_fields() {
        let p = principal_from_value(&json!({
            "id": 42,
            "display_name": "Ops",
            "is_admin": 1,
        }))
        .expect("valid payload");

        assert_eq!(p.id.as_str(), "42");
        assert_eq!(p.display_name, "Ops");
        assert!(p.is_admin);
    }

    #[test]
    fn admin_flag_coercion() {
        for (raw, expected) in [
            (json!(true), true),
            (json!("1"), true),
            (json!("TRUE"), true),
            (json!(1), true),
            (json!(false), false),
            (json!("0"), false),
            (json!("yes"), false),
            (json!(2), false),
            (json!(null), false),
            (json!({}), false),
        ] {
            let p = principal_from_value(&json!({"id": "1", "isAdmin": raw.clone()}))
                .expect("valid payload");
            assert_eq!(p.is_admin, expected, "isAdmin = {raw}");
        }
    }

    #[test]
    fn bad_entries_are_dropped_or_blanked() {
        let (p, report) = normalize_principal(&json!({
            "id": "1",
            "permissions": [
                {"key": "a", "value": 1},
                {"key": "b", "value": true},
                {"key": "c"},
                {"key": "", "value": "1"},
                {"value": "1"},
                "d",
                null,
            ],
        }))
        .expect("valid payload");

        assert_eq!(report.dropped_entries, 4);
        assert_eq!(report.coerced_values, 3);
        assert!(p.permissions.is_granted("a"));
        assert!(!p.permissions.is_granted("b"));
        assert!(!p.permissions.is_granted("c"));
        assert_eq!(p.permissions.len(), 3);
    }

    #[test]
    fn permissions_not_a_list_yields_empty_set() {
        let (p, report) = normalize_principal(&json!({
            "id": "1",
            "permissions": {"key": "a", "value": "1"},
        }))
        .expect("valid payload");

        assert!(report.permissions_not_list);
        assert!(p.permissions.is_empty());
    }

    #[test]
    fn report_maps_to_malformed_error() {
        assert!(NormalizeReport::default().to_error().is_none());

        let (_, report) = normalize_principal(&json!({
            "id": "1",
            "permissions": [{"value": "1"}, {"key": "a", "value": 1}],
        }))
        .expect("valid payload");

        let err = report.to_error().expect("not clean");
        assert_eq!(err.code(), "GATE_MALFORMED_PERMISSION_DATA");
        assert_eq!(
            err.to_string(),
            "malformed permission data: 1 entries dropped, 1 values coerced"
        );
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let p = principal_from_value(&json!({
            "id": "1",
            "permissions": [
                {"key": "a", "value": "1"},
                {"key": "a", "value": "0"},
            ],
        }))
        .expect("valid payload");
        assert!(!p.permissions.is_granted("a"));
    }

    #[test]
    fn non_object_or_missing_id_rejected() {
        for payload in [json!(null), json!([1, 2]), json!("user"), json!({}), json!({"id": ""}), json!({"id": 1.5})] {
            let err = principal_from_value(&payload).expect_err("should reject");
            assert!(matches!(err, GateError::MalformedPermissionData { .. }));
        }
    }
}
