//! Writing tool identifiers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// The writing tools offered by the catalog.
///
/// Parsing is case-insensitive so form values like `"Poem"` resolve.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ToolKind {
    Essay,
    Story,
    Poem,
    Email,
    Thesis,
    Application,
    Report,
    Paragraph,
    Content,
}

impl ToolKind {
    /// Every tool, in catalog order.
    pub const ALL: [ToolKind; 9] = [
        Self::Essay,
        Self::Story,
        Self::Poem,
        Self::Email,
        Self::Thesis,
        Self::Application,
        Self::Report,
        Self::Paragraph,
        Self::Content,
    ];

    /// Canonical lower-case tag.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Parse a user-facing tag, returning `None` for unknown tools.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    /// Whether the free-text `topic` is mandatory for this tool.
    pub const fn requires_topic(self) -> bool {
        !matches!(self, Self::Application)
    }
}
