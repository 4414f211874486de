//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ObjectId`] - Content address of a blob or commit (SHA-256, hex)
//! - [`BranchName`] - Validated branch name
//! - [`Timestamp`] - UTC commit timestamp
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use twig::core::types::{BranchName, ObjectId};
//!
//! let branch = BranchName::new("feature").unwrap();
//! let id = ObjectId::digest(&[b"hello.txt", b"hello"]);
//! assert_eq!(id.as_str().len(), 64);
//!
//! assert!(BranchName::new("bad/name").is_err());
//! assert!(ObjectId::new("not-a-sha").is_err());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),
}

/// The content address of a stored object.
///
/// Ids are lowercase hex SHA-256 digests, always 64 characters.
///
/// # Example
///
/// ```
/// use twig::core::types::ObjectId;
///
/// let a = ObjectId::digest(&[b"a.txt", b"x"]);
/// let b = ObjectId::digest(&[b"a.txt", b"x"]);
/// assert_eq!(a, b);
/// assert_eq!(a.short(7).len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Number of hex characters in a full id.
    pub const HEX_LEN: usize = 64;

    /// Create a validated object id from its hex form.
    ///
    /// The id is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidObjectId` if the string is not 64 hex characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into().to_ascii_lowercase();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Hash a sequence of fields into an id.
    ///
    /// Each field is framed by its big-endian `u64` length, so distinct
    /// field sequences never collide by concatenation and the result is
    /// identical on every platform.
    pub fn digest(fields: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for field in fields {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field);
        }
        Self(hex::encode(hasher.finalize()))
    }

    /// Get an abbreviated form of the id.
    ///
    /// Returns the first `len` characters, or the full id if `len` is larger.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Check whether `prefix` abbreviates this id.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.0.starts_with(&prefix.to_ascii_lowercase())
    }

    /// Check whether a string could be an id or an id prefix.
    pub fn is_hex_prefix(s: &str) -> bool {
        !s.is_empty() && s.len() <= Self::HEX_LEN && s.chars().all(|c| c.is_ascii_hexdigit())
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        if id.len() != Self::HEX_LEN {
            return Err(TypeError::InvalidObjectId(format!(
                "expected {} hex characters, got {}",
                Self::HEX_LEN,
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidObjectId(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated branch name.
///
/// Branches are persisted as one file per name under `branches/`, so the
/// name must be usable as a single path component:
/// - Cannot be empty
/// - Cannot start with `.`
/// - Cannot contain `/` or `\`
/// - Cannot contain whitespace or ASCII control characters
///
/// # Example
///
/// ```
/// use twig::core::types::BranchName;
///
/// let name = BranchName::new("feature-1").unwrap();
/// assert_eq!(name.as_str(), "feature-1");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new(".hidden").is_err());
/// assert!(BranchName::new("a/b").is_err());
/// assert!(BranchName::new("has space").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name cannot name a branch file.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot be empty".into(),
            ));
        }

        if name.starts_with('.') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start with '.'".into(),
            ));
        }

        for c in ['/', '\\'] {
            if name.contains(c) {
                return Err(TypeError::InvalidBranchName(format!(
                    "branch name cannot contain '{c}'"
                )));
            }
        }

        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot contain whitespace or control characters".into(),
            ));
        }

        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A UTC timestamp attached to a commit.
///
/// # Example
///
/// ```
/// use twig::core::types::Timestamp;
///
/// let epoch = Timestamp::epoch();
/// assert_eq!(epoch.canonical(), "1970-01-01T00:00:00.000000000Z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(chrono::DateTime<chrono::Utc>);

impl Timestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(chrono::Utc::now())
    }

    /// The Unix epoch, used by the initial commit.
    pub fn epoch() -> Self {
        // The default UTC datetime is 1970-01-01T00:00:00Z.
        Self(chrono::DateTime::<chrono::Utc>::default())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &chrono::DateTime<chrono::Utc> {
        &self.0
    }

    /// The fixed-precision textual form hashed into commit ids.
    pub fn canonical(&self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
    }

    /// Format with a chrono format string, e.g. `%a %b %-d %H:%M:%S %Y %z`.
    ///
    /// Falls back to the RFC 3339 form if `fmt` is not a valid format.
    pub fn format(&self, fmt: &str) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        match write!(out, "{}", self.0.format(fmt)) {
            Ok(()) => out,
            Err(_) => self.0.to_rfc3339(),
        }
    }

    /// The timestamp one nanosecond later.
    pub fn next_nanosecond(&self) -> Self {
        Self(self.0 + chrono::Duration::nanoseconds(1))
    }

    /// Check that `fmt` is a chrono format string with no invalid items.
    pub fn is_valid_format(fmt: &str) -> bool {
        !fmt.is_empty()
            && chrono::format::StrftimeItems::new(fmt)
                .all(|item| !matches!(item, chrono::format::Item::Error))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
