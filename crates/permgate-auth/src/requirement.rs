//! Declarative access requirements.
//!
//! An [`AccessRequirement`] is what a caller asks for: admin, one key,
//! any of a list, or all of a list. Key lists arrive through loosely typed
//! props (JSON, TOML), so they are modelled by [`RequirementKeys`], which
//! keeps "the caller passed something that is not a list of strings" as a
//! value instead of a deserialization failure.

use serde::{Deserialize, Serialize};

/// A key-list input for any/all checks.
///
/// # Variants
///
/// | Variant | Meaning |
/// |---------|---------|
/// | `Keys` | A sequence of permission keys (possibly empty) |
/// | `Invalid` | The input was present but not a sequence of strings |
///
/// `Invalid` and empty `Keys` are never satisfied for a non-admin.
///
/// # Deserialization
///
/// Any value that is not an array of strings deserializes to `Invalid`
/// rather than failing, so one bad prop cannot take down the surrounding
/// document. `Invalid` serializes as the string [`INVALID_KEYS_MARKER`],
/// never `null`: inside an `Option` a `null` would read back as "no list
/// requested" and turn a denial into a pass.
///
/// ```
/// use permgate_auth::RequirementKeys;
///
/// let keys: RequirementKeys = serde_json::from_str(r#"["a", "b"]"#).unwrap();
/// assert_eq!(keys.as_slice(), Some(&["a".to_string(), "b".to_string()][..]));
///
/// let bad: RequirementKeys = serde_json::from_str(r#""a,b""#).unwrap();
/// assert!(bad.is_invalid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementKeys {
    /// A sequence of permission keys.
    Keys(Vec<String>),
    /// Input that is not a sequence of strings.
    Invalid,
}

impl RequirementKeys {
    /// Returns the keys, or `None` for invalid input.
    #[must_use]
    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            Self::Keys(keys) => Some(keys),
            Self::Invalid => None,
        }
    }

    /// Returns `true` for the `Invalid` variant.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// Returns `true` if there is no key to check (empty or invalid).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().map_or(true, <[String]>::is_empty)
    }
}

impl<S: Into<String>> FromIterator<S> for RequirementKeys {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::Keys(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for RequirementKeys {
    fn from(keys: Vec<String>) -> Self {
        Self::Keys(keys)
    }
}

impl From<&[&str]> for RequirementKeys {
    fn from(keys: &[&str]) -> Self {
        keys.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for RequirementKeys {
    fn from(keys: [&str; N]) -> Self {
        keys.into_iter().collect()
    }
}

/// Serialized form of [`RequirementKeys::Invalid`].
pub const INVALID_KEYS_MARKER: &str = "<invalid>";

impl Serialize for RequirementKeys {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Keys(keys) => keys.serialize(serializer),
            Self::Invalid => serializer.serialize_str(INVALID_KEYS_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for RequirementKeys {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Keys(Vec<String>),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Keys(keys) => Self::Keys(keys),
            Raw::Other(_) => Self::Invalid,
        })
    }
}

impl std::fmt::Display for RequirementKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Keys(keys) => write!(f, "[{}]", keys.join(", ")),
            Self::Invalid => f.write_str("<invalid>"),
        }
    }
}

/// A declarative guard.
///
/// An administrator satisfies every variant without the permission set
/// being inspected.
///
/// # Example
///
/// ```
/// use permgate_auth::AccessRequirement;
///
/// let req = AccessRequirement::all(["vehicle_info", "data_cam_preparation"]);
/// assert_eq!(req.kind_str(), "all");
/// assert_eq!(req.to_string(), "all of [vehicle_info, data_cam_preparation]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "keys", rename_all = "snake_case")]
pub enum AccessRequirement {
    /// Satisfied iff the principal is an administrator.
    RequireAdmin,
    /// Satisfied iff the key is granted (or admin).
    RequireSingle(String),
    /// Satisfied iff at least one key is granted (or admin).
    RequireAny(RequirementKeys),
    /// Satisfied iff every key is granted (or admin).
    RequireAll(RequirementKeys),
}

impl AccessRequirement {
    #[must_use]
    pub fn single(key: impl Into<String>) -> Self {
        Self::RequireSingle(key.into())
    }

    #[must_use]
    pub fn any(keys: impl Into<RequirementKeys>) -> Self {
        Self::RequireAny(keys.into())
    }

    #[must_use]
    pub fn all(keys: impl Into<RequirementKeys>) -> Self {
        Self::RequireAll(keys.into())
    }

    /// Short name of the variant ("admin", "single", "any", "all").
    #[must_use]
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::RequireAdmin => "admin",
            Self::RequireSingle(_) => "single",
            Self::RequireAny(_) => "any",
            Self::RequireAll(_) => "all",
        }
    }
}

impl std::fmt::Display for AccessRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequireAdmin => f.write_str("admin"),
            Self::RequireSingle(key) => write!(f, "permission {key}"),
            Self::RequireAny(keys) => write!(f, "any of {keys}"),
            Self::RequireAll(keys) => write!(f, "all of {keys}"),
        }
    }
}
