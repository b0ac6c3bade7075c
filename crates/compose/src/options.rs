//! Composition settings.

use serde::{Deserialize, Serialize};

/// How a text binding combines with the element's existing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextPolicy {
    /// Existing text, a space, then the cell value.
    #[default]
    Append,
    /// The cell value alone.
    Replace,
}

/// Options for [`crate::compose`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeOptions {
    /// Text binding policy.
    #[serde(default)]
    pub text_policy: TextPolicy,
    /// Title and label of injected links.
    #[serde(default = "default_link_title")]
    pub link_title: String,
}

fn default_link_title() -> String {
    "Get more info".to_string()
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            text_policy: TextPolicy::default(),
            link_title: default_link_title(),
        }
    }
}

impl ComposeOptions {
    /// Parses options from JSON; missing keys take their defaults.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
