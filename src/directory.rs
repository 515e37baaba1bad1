//! In-memory group directory.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::GateError;
use crate::traits::MembershipProvider;
use crate::types::{GroupId, GroupSummary, MembershipSet, ViewerId};

#[derive(Debug, Default)]
struct DirectoryState {
    groups: Vec<GroupSummary>,
    members: HashMap<ViewerId, MembershipSet>,
}

/// A `MembershipProvider` backed by memory. Cloneable; clones share state.
///
/// Groups are listed in the order they were added. Membership is reported
/// as recorded, without checking that the groups are still listed.
#[derive(Debug, Clone, Default)]
pub struct GroupDirectory {
    inner: Arc<RwLock<DirectoryState>>,
}

impl GroupDirectory {
    /// An empty directory with no groups and no members.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, or rename it if the id is already listed.
    ///
    /// Ids that could not be stored in a restriction set (the wildcard token,
    /// empty ids, control characters) are rejected with
    /// [`GateError::InvalidGroupId`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use content_gate_core::{GroupDirectory, MembershipProvider};
    ///
    /// let directory = GroupDirectory::new();
    /// directory.add_group("Sales Team", "Sales").unwrap();
    /// assert!(directory.add_group("all_groups", "Everyone").is_err());
    /// assert_eq!(directory.all_groups().unwrap().len(), 1);
    /// ```
    pub fn add_group(
        &self,
        id: impl Into<GroupId>,
        display_name: impl Into<String>,
    ) -> Result<(), GateError> {
        let summary = GroupSummary::new(id, display_name);
        summary.id.as_str().parse::<GroupId>()?;
        let mut state = self.inner.write()?;
        match state.groups.iter().position(|g| g.id == summary.id) {
            Some(idx) => state.groups[idx] = summary,
            None => state.groups.push(summary),
        }
        Ok(())
    }

    /// Remove a group from the listing. Existing memberships are left alone.
    pub fn remove_group(&self, id: &GroupId) -> Result<(), GateError> {
        self.inner.write()?.groups.retain(|g| &g.id != id);
        Ok(())
    }

    /// Record `viewer` as a member of `group`. The group does not have to be listed.
    pub fn add_member(
        &self,
        viewer: impl Into<ViewerId>,
        group: impl Into<GroupId>,
    ) -> Result<(), GateError> {
        self.inner
            .write()?
            .members
            .entry(viewer.into())
            .or_default()
            .insert(group);
        Ok(())
    }

    /// Drop one membership. Unknown viewers and groups are ignored.
    pub fn remove_member(&self, viewer: &ViewerId, group: &GroupId) -> Result<(), GateError> {
        if let Some(membership) = self.inner.write()?.members.get_mut(viewer) {
            membership.remove(group);
        }
        Ok(())
    }
}

impl MembershipProvider for GroupDirectory {
    fn membership_of(&self, viewer: &ViewerId) -> Result<MembershipSet, GateError> {
        Ok(self
            .inner
            .read()?
            .members
            .get(viewer)
            .cloned()
            .unwrap_or_default())
    }

    fn all_groups(&self) -> Result<Vec<GroupSummary>, GateError> {
        Ok(self.inner.read()?.groups.clone())
    }
}
