//! Principal (authenticated actor) types.
//!
//! A [`Principal`] is the snapshot the authentication layer hands over
//! after login: who the actor is, whether they are an administrator, and
//! the permission set fetched for them. It carries no decision logic;
//! access checks live in `permgate-auth`.

use crate::{PermissionGrant, PermissionSet, PrincipalId};
use serde::{Deserialize, Serialize};

/// The authenticated actor whose access is being evaluated.
///
/// A principal is created on successful authentication and replaced
/// wholesale on re-authentication. Nothing mutates it in place; a new
/// login produces a new value.
///
/// # Serialization
///
/// Uses the backend's camelCase field names (`displayName`, `isAdmin`)
/// so that a stored snapshot round-trips through the same shape the
/// backend produced.
///
/// # Example
///
/// ```
/// use permgate_types::{PermissionGrant, Principal, PrincipalId};
///
/// let principal = Principal::new(PrincipalId::new("7"), "Operator")
///     .with_grants([PermissionGrant::granted("data_cam_preparation")]);
///
/// assert!(!principal.is_admin);
/// assert!(principal.permissions.is_granted("data_cam_preparation"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Backend identifier.
    pub id: PrincipalId,
    /// Human-readable name shown in the UI.
    #[serde(default)]
    pub display_name: String,
    /// Administrator override flag.
    #[serde(default)]
    pub is_admin: bool,
    /// Permission snapshot fetched at login.
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl Principal {
    /// Creates a non-admin principal with no permissions.
    #[must_use]
    pub fn new(id: PrincipalId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            is_admin: false,
            permissions: PermissionSet::new(),
        }
    }

    /// Creates an administrator with no explicit permissions.
    #[must_use]
    pub fn admin(id: PrincipalId, display_name: impl Into<String>) -> Self {
        Self {
            is_admin: true,
            ..Self::new(id, display_name)
        }
    }

    /// Replaces the permission set with the given grants.
    #[must_use]
    pub fn with_grants(mut self, grants: impl IntoIterator<Item = PermissionGrant>) -> Self {
        self.permissions = PermissionSet::from_grants(grants);
        self
    }

    /// Replaces the permission set.
    #[must_use]
    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = permissions;
        self
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = if self.is_admin { "admin" } else { "user" };
        write!(f, "{}:{}", role, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_not_admin() {
        let p = Principal::new(PrincipalId::new("1"), "A");
        assert!(!p.is_admin);
        assert!(p.permissions.is_empty());
    }

    #[test]
    fn admin_constructor() {
        let p = Principal::admin(PrincipalId::new("1"), "Root");
        assert!(p.is_admin);
        assert_eq!(p.display_name, "Root");
    }

    #[test]
    fn display_shows_role() {
        assert_eq!(
            format!("{}", Principal::new(PrincipalId::new("9"), "x")),
            "user:9"
        );
        assert_eq!(
            format!("{}", Principal::admin(PrincipalId::new("9"), "x")),
            "admin:9"
        );
    }

    #[test]
    fn serde_uses_backend_field_names() {
        let p = Principal::new(PrincipalId::new("3"), "Planner")
            .with_grants([PermissionGrant::granted("vehicle_info")]);
        let json = serde_json::to_value(&p).expect("serialize");

        assert_eq!(json["displayName"], "Planner");
        assert_eq!(json["isAdmin"], false);
        assert_eq!(json["permissions"][0]["key"], "vehicle_info");

        let parsed: Principal = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed, p);
    }

    #[test]
    fn missing_optional_fields_default() {
        let parsed: Principal =
            serde_json::from_value(serde_json::json!({ "id": "5" })).expect("deserialize");
        assert_eq!(parsed.id.as_str(), "5");
        assert!(!parsed.is_admin);
        assert!(parsed.permissions.is_empty());
    }
}
