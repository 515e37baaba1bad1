use crate::error::GateError;
use crate::types::{ContentId, GroupSummary, MembershipSet, RestrictionSet, ViewerId};

/// Per-item restriction storage.
///
/// Implementations must serialize writes to the same content id. A missing
/// entry means the item is public.
pub trait RestrictionStore: Send + Sync {
    /// Fetch the stored restriction set, `None` if the item has none.
    fn get(&self, content: &ContentId) -> Result<Option<RestrictionSet>, GateError>;

    /// Store a restriction set. Storing an empty set removes the entry.
    fn set(&self, content: &ContentId, restriction: RestrictionSet) -> Result<(), GateError>;

    /// Remove any stored restriction set. Removing a missing entry is not an error.
    fn delete(&self, content: &ContentId) -> Result<(), GateError>;
}

/// Source of group membership and the catalogue of known groups.
pub trait MembershipProvider: Send + Sync {
    /// The groups `viewer` belongs to right now.
    fn membership_of(&self, viewer: &ViewerId) -> Result<MembershipSet, GateError>;

    /// Every known group, in presentation order.
    fn all_groups(&self) -> Result<Vec<GroupSummary>, GateError>;
}
