//! Permission grants and the permission set carried by a principal.
//!
//! A grant is a single `key`/`value` authorization fact. Only the literal
//! value [`GRANTED_VALUE`] (`"1"`) means "granted". The backend also uses
//! the same record shape for non-boolean custom fields, so any other value
//! (including `"true"`, `"yes"` or `"2"`) is deliberately **not** granted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The only grant value treated as "granted".
pub const GRANTED_VALUE: &str = "1";

/// A single authorization fact.
///
/// # Example
///
/// ```
/// use permgate_types::PermissionGrant;
///
/// assert!(PermissionGrant::granted("vehicle_info").is_granted());
/// assert!(!PermissionGrant::new("vehicle_info", "true").is_granted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Stable identifier, e.g. `"data_cam_preparation"`.
    pub key: String,
    /// Grant value. Only `"1"` is granted.
    pub value: String,
}

impl PermissionGrant {
    /// Creates a grant with an arbitrary value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a grant whose value is [`GRANTED_VALUE`].
    #[must_use]
    pub fn granted(key: impl Into<String>) -> Self {
        Self::new(key, GRANTED_VALUE)
    }

    /// Returns `true` iff the value is exactly `"1"`.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        self.value == GRANTED_VALUE
    }
}

/// The set of grants held by a principal.
///
/// Keys are unique. When the input contains the same key twice the later
/// entry wins. A set is an immutable snapshot; there is no partial refresh.
///
/// Serializes as a list of `{ "key", "value" }` records, sorted by key.
///
/// # Example
///
/// ```
/// use permgate_types::{PermissionGrant, PermissionSet};
///
/// let set = PermissionSet::from_grants([
///     PermissionGrant::new("vehicle_info", "0"),
///     PermissionGrant::granted("vehicle_info"),
/// ]);
/// assert_eq!(set.len(), 1);
/// assert!(set.is_granted("vehicle_info"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    grants: HashMap<String, String>,
}

impl PermissionSet {
    /// Creates an empty permission set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from grants, last write wins on duplicate keys.
    #[must_use]
    pub fn from_grants(grants: impl IntoIterator<Item = PermissionGrant>) -> Self {
        let grants = grants
            .into_iter()
            .map(|grant| (grant.key, grant.value))
            .collect();
        Self { grants }
    }

    /// Returns `true` iff `key` is present with value `"1"`.
    #[must_use]
    pub fn is_granted(&self, key: &str) -> bool {
        self.grants
            .get(key)
            .is_some_and(|value| value == GRANTED_VALUE)
    }

    /// Returns the raw value stored for `key`, if any.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.grants.get(key).map(String::as_str)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// Keys whose value is `"1"`, sorted.
    #[must_use]
    pub fn granted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .grants
            .iter()
            .filter(|(_, value)| value.as_str() == GRANTED_VALUE)
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// All grants as owned records, sorted by key.
    #[must_use]
    pub fn to_grants(&self) -> Vec<PermissionGrant> {
        let mut grants: Vec<PermissionGrant> = self
            .grants
            .iter()
            .map(|(key, value)| PermissionGrant::new(key.as_str(), value.as_str()))
            .collect();
        grants.sort_by(|a, b| a.key.cmp(&b.key));
        grants
    }
}

impl FromIterator<PermissionGrant> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = PermissionGrant>>(iter: T) -> Self {
        Self::from_grants(iter)
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_grants().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let grants = Vec::<PermissionGrant>::deserialize(deserializer)?;
        Ok(Self::from_grants(grants))
    }
}
