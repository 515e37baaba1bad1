use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::GateError;

/// Output of a denied render, as the original plugin printed it.
pub const DEFAULT_PLACEHOLDER: &str = "<p>This is restricted content.</p>";
pub const DEFAULT_ANY_GROUP_LABEL: &str = "All Groups";

/// Presentation settings for a `ContentGate`.
///
/// Missing fields fall back to their defaults:
///
/// ```rust
/// use content_gate_core::GateConfig;
///
/// let config = GateConfig::from_json_str(r#"{"placeholder": "Members only."}"#).unwrap();
/// assert_eq!(config.placeholder, "Members only.");
/// assert_eq!(config.any_group_label, "All Groups");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct GateConfig {
    /// Shown instead of the content when access is denied.
    pub placeholder: String,
    /// Label of the wildcard option in restriction editors.
    pub any_group_label: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            any_group_label: DEFAULT_ANY_GROUP_LABEL.to_string(),
        }
    }
}

impl GateConfig {
    /// Parse a JSON object. Unknown fields are ignored, missing ones default.
    pub fn from_json_str(json: &str) -> Result<Self, GateError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_any_group_label(mut self, label: impl Into<String>) -> Self {
        self.any_group_label = label.into();
        self
    }
}
