//! Render-time context and editor-facing types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::restriction::RestrictionSet;

/// Describes where content is being rendered.
///
/// Restrictions apply only to the canonical single-item view. Listings,
/// feeds and secondary renders pass content through unchanged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct RenderContext {
    pub canonical_view: bool,
}

impl RenderContext {
    /// The canonical single-item view of a content item.
    pub fn canonical() -> Self {
        RenderContext {
            canonical_view: true,
        }
    }

    /// Any other rendering context.
    pub fn secondary() -> Self {
        RenderContext {
            canonical_view: false,
        }
    }
}

/// Result of the caller's anti-forgery check on a restriction save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Authenticity {
    Verified,
    Rejected,
}

/// One selectable option in a restriction editor.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct RestrictionChoice {
    /// Token submitted back when this option is selected.
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// What a restriction save did to the store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum SaveOutcome {
    Stored(RestrictionSet),
    Cleared,
}
