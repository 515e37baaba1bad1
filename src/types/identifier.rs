//! Opaque identifiers for content items and viewers.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

/// Marker type for content items
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentMarker {}

/// Marker type for viewers
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ViewerMarker {}

/// An opaque identifier tagged with what it identifies, with zero runtime cost over `String`.
///
/// The marker keeps a content id from being passed where a viewer id is expected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier<T> {
    id: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Identifier<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Identifier {
            id: id.into(),
            _marker: PhantomData,
        }
    }

    /// Get the raw id.
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> Display for Identifier<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.id)
    }
}

impl<T> From<&str> for Identifier<T> {
    fn from(value: &str) -> Self {
        Identifier::new(value)
    }
}

impl<T> From<String> for Identifier<T> {
    fn from(value: String) -> Self {
        Identifier::new(value)
    }
}

impl<T> From<u64> for Identifier<T> {
    fn from(value: u64) -> Self {
        Identifier::new(value.to_string())
    }
}

/// A content item's identifier.
pub type ContentId = Identifier<ContentMarker>;

/// A viewer's identifier.
pub type ViewerId = Identifier<ViewerMarker>;
