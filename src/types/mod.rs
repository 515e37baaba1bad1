//! Data model types for access decisions.
//!
//! Canonical string forms:
//! - GroupId: any opaque token, e.g. `7` or `editors`
//! - Wildcard: `all_groups`, valid only inside a restriction set
//! - RestrictionSet: `[all_groups, 7]`, serialized as a JSON array of tokens
//! - MembershipSet: `[3, 7]`, serialized as a JSON array of group ids

mod group;
mod identifier;
mod render;
mod restriction;
mod verdict;

pub use group::{ANY_GROUP_TOKEN, GroupId, GroupSummary, RestrictionEntry};
pub use identifier::{ContentId, ContentMarker, Identifier, ViewerId, ViewerMarker};
pub use render::{Authenticity, RenderContext, RestrictionChoice, SaveOutcome};
pub use restriction::{MembershipSet, RestrictionSet};
pub use verdict::Verdict;
