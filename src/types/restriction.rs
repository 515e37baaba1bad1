//! Restriction and membership sets.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GateError;

use super::group::{GroupId, RestrictionEntry};

/// The groups permitted to view one content item.
///
/// An empty set means the item is public. Serialized as an array of tokens,
/// with the wildcard written as `all_groups`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(transparent)]
#[schema(value_type = Vec<String>)]
pub struct RestrictionSet(BTreeSet<RestrictionEntry>);

impl RestrictionSet {
    /// An unrestricted (public) set.
    pub fn public() -> Self {
        Self::default()
    }

    /// A set containing only the any-group wildcard.
    pub fn any_group() -> Self {
        RestrictionSet(BTreeSet::from([RestrictionEntry::AnyGroup]))
    }

    /// Build a set from specific groups.
    pub fn groups<I, G>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupId>,
    {
        groups
            .into_iter()
            .map(|g| RestrictionEntry::Group(g.into()))
            .collect()
    }

    /// Parse and validate submitted tokens. Fails on the first invalid token.
    pub fn parse_tokens<I, S>(tokens: I) -> Result<Self, GateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .map(|t| t.as_ref().parse::<RestrictionEntry>())
            .collect()
    }

    /// Add the wildcard and return the updated set.
    pub fn with_any_group(mut self) -> Self {
        self.0.insert(RestrictionEntry::AnyGroup);
        self
    }

    /// Add one group and return the updated set.
    pub fn with_group(mut self, group: impl Into<GroupId>) -> Self {
        self.0.insert(RestrictionEntry::Group(group.into()));
        self
    }

    pub fn insert(&mut self, entry: RestrictionEntry) -> bool {
        self.0.insert(entry)
    }

    /// Returns true when the item is public.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, entry: &RestrictionEntry) -> bool {
        self.0.contains(entry)
    }

    pub fn contains_any_group(&self) -> bool {
        self.0.contains(&RestrictionEntry::AnyGroup)
    }

    /// The specific groups in this set, without the wildcard.
    pub fn group_ids(&self) -> impl Iterator<Item = &GroupId> {
        self.0.iter().filter_map(|entry| match entry {
            RestrictionEntry::Group(id) => Some(id),
            RestrictionEntry::AnyGroup => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RestrictionEntry> {
        self.0.iter()
    }
}

impl Display for RestrictionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

impl FromIterator<RestrictionEntry> for RestrictionSet {
    fn from_iter<T: IntoIterator<Item = RestrictionEntry>>(iter: T) -> Self {
        RestrictionSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RestrictionSet {
    type Item = &'a RestrictionEntry;
    type IntoIter = std::collections::btree_set::Iter<'a, RestrictionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The groups a viewer belongs to at decision time.
///
/// Anonymous viewers have an empty membership set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(transparent)]
#[schema(value_type = Vec<String>)]
pub struct MembershipSet(BTreeSet<GroupId>);

impl MembershipSet {
    /// The membership of a viewer who belongs to no group.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Membership in exactly `groups`. Duplicates collapse.
    pub fn new<I, G>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupId>,
    {
        MembershipSet(groups.into_iter().map(Into::into).collect())
    }

    pub fn insert(&mut self, group: impl Into<GroupId>) -> bool {
        self.0.insert(group.into())
    }

    pub fn remove(&mut self, group: &GroupId) -> bool {
        self.0.remove(group)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, group: &GroupId) -> bool {
        self.0.contains(group)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupId> {
        self.0.iter()
    }
}

impl Display for MembershipSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

impl FromIterator<GroupId> for MembershipSet {
    fn from_iter<T: IntoIterator<Item = GroupId>>(iter: T) -> Self {
        MembershipSet(iter.into_iter().collect())
    }
}
