//! Pure access evaluation.
//!
//! Every function takes the principal snapshot as `Option<&Principal>`
//! (`None` = no session) and returns a plain `bool`. They never panic and
//! never return errors: missing principals, empty key lists and invalid
//! key-list input all resolve to `false`.
//!
//! # Rules
//!
//! | Check | Admin | Non-admin | No principal |
//! |-------|-------|-----------|--------------|
//! | `is_admin` | true | false | false |
//! | `has_permission(k)` | true | `k` granted | false |
//! | `has_any_permission(ks)` | true | some `k` granted, `ks` non-empty | false |
//! | `has_all_permissions(ks)` | true | every `k` granted, `ks` non-empty | false |
//!
//! Admin override is applied before the key list is looked at, so an
//! administrator passes even an empty or invalid list. For everyone else an
//! empty list is never "all satisfied".

use crate::{AccessRequirement, RequirementKeys};
use permgate_types::Principal;

/// Returns `true` iff a principal is present and is an administrator.
#[must_use]
pub fn is_admin(principal: Option<&Principal>) -> bool {
    principal.is_some_and(|p| p.is_admin)
}

/// Returns `true` for admins, else iff `key` is granted with value `"1"`.
///
/// # Example
///
/// ```
/// use permgate_auth::evaluate;
/// use permgate_types::{PermissionGrant, Principal, PrincipalId};
///
/// let p = Principal::new(PrincipalId::new("1"), "A")
///     .with_grants([PermissionGrant::granted("data_cam_preparation")]);
///
/// assert!(evaluate::has_permission(Some(&p), "data_cam_preparation"));
/// assert!(!evaluate::has_permission(Some(&p), "vehicle_info"));
/// assert!(!evaluate::has_permission(None, "data_cam_preparation"));
/// ```
#[must_use]
pub fn has_permission(principal: Option<&Principal>, key: &str) -> bool {
    match principal {
        Some(p) if p.is_admin => true,
        Some(p) => p.permissions.is_granted(key),
        None => false,
    }
}

/// Returns `true` for admins, else iff at least one key is granted.
#[must_use]
pub fn has_any_permission(principal: Option<&Principal>, keys: &RequirementKeys) -> bool {
    let Some(p) = principal else {
        return false;
    };
    if p.is_admin {
        return true;
    }
    match keys.as_slice() {
        Some(keys) => keys.iter().any(|key| p.permissions.is_granted(key)),
        None => false,
    }
}

/// Returns `true` for admins, else iff the list is non-empty and every key
/// is granted.
#[must_use]
pub fn has_all_permissions(principal: Option<&Principal>, keys: &RequirementKeys) -> bool {
    let Some(p) = principal else {
        return false;
    };
    if p.is_admin {
        return true;
    }
    match keys.as_slice() {
        Some(keys) if !keys.is_empty() => keys.iter().all(|key| p.permissions.is_granted(key)),
        _ => false,
    }
}

/// Evaluates a single [`AccessRequirement`].
#[must_use]
pub fn check(principal: Option<&Principal>, requirement: &AccessRequirement) -> bool {
    match requirement {
        AccessRequirement::RequireAdmin => is_admin(principal),
        AccessRequirement::RequireSingle(key) => has_permission(principal, key),
        AccessRequirement::RequireAny(keys) => has_any_permission(principal, keys),
        AccessRequirement::RequireAll(keys) => has_all_permissions(principal, keys),
    }
}

/// Keys from `keys` that the principal does not hold.
///
/// Empty for admins. For a missing principal every key is missing. Used for
/// denial diagnostics only; decisions go through the functions above.
#[must_use]
pub fn missing_keys<'k>(principal: Option<&Principal>, keys: &'k RequirementKeys) -> Vec<&'k str> {
    if is_admin(principal) {
        return Vec::new();
    }
    keys.as_slice()
        .unwrap_or_default()
        .iter()
        .filter(|key| !has_permission(principal, key))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use permgate_types::{PermissionGrant, PrincipalId};

    fn planner() -> Principal {
        Principal::new(PrincipalId::new("7"), "Planner")
            .with_grants([PermissionGrant::granted("data_cam_preparation")])
    }

    fn admin() -> Principal {
        Principal::admin(PrincipalId::new("1"), "Root")
    }

    // ─── Reference scenarios ──────────────────────────────────────

    #[test]
    fn granted_key_is_permitted() {
        assert!(has_permission(Some(&planner()), "data_cam_preparation"));
    }

    #[test]
    fn absent_key_is_denied() {
        assert!(!has_permission(Some(&planner()), "vehicle_info"));
    }

    #[test]
    fn any_with_one_granted_key_passes() {
        let keys = RequirementKeys::from(["vehicle_info", "data_cam_preparation"]);
        assert!(has_any_permission(Some(&planner()), &keys));
    }

    #[test]
    fn all_with_one_missing_key_fails() {
        let keys = RequirementKeys::from(["vehicle_info", "data_cam_preparation"]);
        assert!(!has_all_permissions(Some(&planner()), &keys));
    }

    #[test]
    fn admin_without_grants_passes_all() {
        assert!(has_all_permissions(
            Some(&admin()),
            &RequirementKeys::from(["anything"])
        ));
    }

    #[test]
    fn no_principal_is_denied() {
        assert!(!has_permission(None, "data_cam_preparation"));
    }

    // ─── Edge cases ───────────────────────────────────────────────

    #[test]
    fn empty_lists_fail_closed_for_non_admin() {
        let empty = RequirementKeys::Keys(vec![]);
        assert!(!has_any_permission(Some(&planner()), &empty));
        assert!(!has_all_permissions(Some(&planner()), &empty));
    }

    #[test]
    fn invalid_lists_fail_closed_for_non_admin() {
        assert!(!has_any_permission(Some(&planner()), &RequirementKeys::Invalid));
        assert!(!has_all_permissions(Some(&planner()), &RequirementKeys::Invalid));
    }

    #[test]
    fn admin_passes_empty_and_invalid_lists() {
        let empty = RequirementKeys::Keys(vec![]);
        assert!(has_any_permission(Some(&admin()), &empty));
        assert!(has_all_permissions(Some(&admin()), &empty));
        assert!(has_any_permission(Some(&admin()), &RequirementKeys::Invalid));
        assert!(has_all_permissions(Some(&admin()), &RequirementKeys::Invalid));
    }

    #[test]
    fn non_one_values_are_not_granted() {
        let p = Principal::new(PrincipalId::new("2"), "B").with_grants([
            PermissionGrant::new("vehicle_info", "true"),
            PermissionGrant::new("doc_upload", "0"),
        ]);
        assert!(!has_permission(Some(&p), "vehicle_info"));
        assert!(!has_permission(Some(&p), "doc_upload"));
    }

    #[test]
    fn check_dispatches_by_variant() {
        let p = planner();
        assert!(!check(Some(&p), &AccessRequirement::RequireAdmin));
        assert!(check(Some(&p), &AccessRequirement::single("data_cam_preparation")));
        assert!(check(
            Some(&p),
            &AccessRequirement::any(["x", "data_cam_preparation"])
        ));
        assert!(!check(
            Some(&p),
            &AccessRequirement::all(["x", "data_cam_preparation"])
        ));
        assert!(check(Some(&admin()), &AccessRequirement::RequireAdmin));
    }

    #[test]
    fn missing_keys_lists_denied_keys() {
        let keys = RequirementKeys::from(["vehicle_info", "data_cam_preparation", "po_approve"]);
        assert_eq!(
            missing_keys(Some(&planner()), &keys),
            vec!["vehicle_info", "po_approve"]
        );
        assert!(missing_keys(Some(&admin()), &keys).is_empty());
        assert_eq!(missing_keys(None, &keys).len(), 3);
        assert!(missing_keys(Some(&planner()), &RequirementKeys::Invalid).is_empty());
    }

    // ─── Property-Based Tests ─────────────────────────────────────

    mod proptest_evaluate {
        use super::*;
        use proptest::prelude::*;

        fn key_strategy() -> impl Strategy<Value = String> {
            "[a-z_]{1,12}"
        }

        fn value_strategy() -> impl Strategy<Value = String> {
            prop_oneof![Just("1".to_string()), Just("0".to_string()), "[a-z0-9]{0,3}"]
        }

        fn principal_strategy() -> impl Strategy<Value = Principal> {
            prop::collection::vec((key_strategy(), value_strategy()), 0..8).prop_map(|grants| {
                Principal::new(PrincipalId::new("p"), "P").with_grants(
                    grants
                        .into_iter()
                        .map(|(key, value)| PermissionGrant::new(key, value)),
                )
            })
        }

        fn keys_strategy() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec(key_strategy(), 0..6)
        }

        proptest! {
            /// Admins pass every check, whatever the input
            #[test]
            fn admin_override(p in principal_strategy(), key in key_strategy(), keys in keys_strategy()) {
                let admin = Principal { is_admin: true, ..p };
                let keys = RequirementKeys::Keys(keys);
                prop_assert!(has_permission(Some(&admin), &key));
                prop_assert!(has_any_permission(Some(&admin), &keys));
                prop_assert!(has_all_permissions(Some(&admin), &keys));
            }

            /// Non-admin single-key checks are exactly "grant == 1"
            #[test]
            fn single_key_matches_grant(p in principal_strategy(), key in key_strategy()) {
                let expected = p.permissions.value(&key) == Some("1");
                prop_assert_eq!(has_permission(Some(&p), &key), expected);
            }

            /// Adding a granted key never turns an any-check from true to false
            #[test]
            fn any_is_monotonic(p in principal_strategy(), keys in keys_strategy(), extra in key_strategy()) {
                let before = has_any_permission(Some(&p), &RequirementKeys::Keys(keys.clone()));
                let granted = p.clone().with_permissions(
                    p.permissions.to_grants().into_iter()
                        .chain([PermissionGrant::granted(extra.clone())])
                        .collect(),
                );
                let mut extended = keys;
                extended.push(extra);
                let after = has_any_permission(Some(&granted), &RequirementKeys::Keys(extended));
                prop_assert!(after);
                prop_assert!(!before || after);
            }

            /// Removing the only failing key flips an all-check to true
            #[test]
            fn all_flips_when_sole_missing_key_removed(p in principal_strategy(), missing in "[A-Z]{1,8}") {
                let granted: Vec<String> = p.permissions.granted_keys().into_iter().map(String::from).collect();
                prop_assume!(!granted.is_empty());
                let mut keys = granted.clone();
                keys.push(missing);
                prop_assert!(!has_all_permissions(Some(&p), &RequirementKeys::Keys(keys)));
                prop_assert!(has_all_permissions(Some(&p), &RequirementKeys::Keys(granted)));
            }

            /// With no principal every check is false
            #[test]
            fn no_principal_denies_everything(key in key_strategy(), keys in keys_strategy()) {
                let keys = RequirementKeys::Keys(keys);
                prop_assert!(!is_admin(None));
                prop_assert!(!has_permission(None, &key));
                prop_assert!(!has_any_permission(None, &keys));
                prop_assert!(!has_all_permissions(None, &keys));
            }
        }
    }
}
