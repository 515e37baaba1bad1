//! Group identifiers and restriction entries.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GateError;

/// Wire token of the "any group" wildcard in a restriction set.
pub const ANY_GROUP_TOKEN: &str = "all_groups";

static GROUP_ID_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^[:cntrl:]]{1,255}$").expect("group id pattern is a valid regex")
});

/// An opaque group identifier (e.g. `"7"`, `"editors"` or `"Sales Team"`).
///
/// The value is never parsed for meaning. `GroupId::new` accepts anything;
/// `FromStr` is the boundary check used when ids arrive from outside the
/// process, and [`GroupId::is_restrictable`] tells whether an id can appear
/// in a restriction set at all.
///
/// # Example
///
/// ```rust
/// use content_gate_core::GroupId;
///
/// let id: GroupId = "Sales Team".parse().unwrap();
/// assert!(id.is_restrictable());
/// assert!("all_groups".parse::<GroupId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        GroupId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id survives the boundary check, i.e. whether it can be
    /// stored in and read back from a restriction set.
    pub fn is_restrictable(&self) -> bool {
        check_token(&self.0).is_ok()
    }
}

/// Reserved token or wrong shape (empty, over 255 characters, or containing
/// control characters).
fn check_token(s: &str) -> Result<(), GateError> {
    if s == ANY_GROUP_TOKEN {
        return Err(GateError::InvalidGroupId(format!(
            "'{s}' is reserved for the any-group wildcard"
        )));
    }
    if !GROUP_ID_SHAPE.is_match(s) {
        return Err(GateError::InvalidGroupId(format!(
            "{s:?} (expected 1 to 255 characters without control characters)"
        )));
    }
    Ok(())
}

impl Display for GroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for GroupId {
    fn from(value: u64) -> Self {
        GroupId(value.to_string())
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        GroupId::new(value)
    }
}

impl From<String> for GroupId {
    fn from(value: String) -> Self {
        GroupId(value)
    }
}

impl FromStr for GroupId {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_token(s)?;
        Ok(GroupId::new(s))
    }
}

/// One element of a restriction set: a specific group, or the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RestrictionEntry {
    /// Any viewer who belongs to at least one group.
    AnyGroup,
    Group(GroupId),
}

impl Display for RestrictionEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RestrictionEntry::AnyGroup => write!(f, "{ANY_GROUP_TOKEN}"),
            RestrictionEntry::Group(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for RestrictionEntry {
    type Err = GateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ANY_GROUP_TOKEN {
            Ok(RestrictionEntry::AnyGroup)
        } else {
            s.parse().map(RestrictionEntry::Group)
        }
    }
}

impl TryFrom<String> for RestrictionEntry {
    type Error = GateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RestrictionEntry> for String {
    fn from(value: RestrictionEntry) -> Self {
        value.to_string()
    }
}

impl From<GroupId> for RestrictionEntry {
    fn from(value: GroupId) -> Self {
        RestrictionEntry::Group(value)
    }
}

/// A known group as listed by a membership provider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct GroupSummary {
    pub id: GroupId,
    pub display_name: String,
}

impl GroupSummary {
    pub fn new(id: impl Into<GroupId>, display_name: impl Into<String>) -> Self {
        GroupSummary {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}
