//! Generation outcomes and the result handed back to the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LettricsError;

use super::{GenerationRequest, ToolKind};

/// How the final content was produced.
///
/// The external contract reports both variants as success; the distinction
/// exists for logging and tests.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// Normalized text from the remote endpoint.
    Remote { content: String },
    /// Locally synthesized template, with the failure that triggered it.
    Fallback {
        content: String,
        cause: LettricsError,
    },
}

impl GenerationOutcome {
    pub fn content(&self) -> &str {
        match self {
            Self::Remote { content } | Self::Fallback { content, .. } => content,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            Self::Remote { content } | Self::Fallback { content, .. } => content,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The failure that caused a fallback, if any.
    pub fn cause(&self) -> Option<&LettricsError> {
        match self {
            Self::Remote { .. } => None,
            Self::Fallback { cause, .. } => Some(cause),
        }
    }
}

/// Final content plus the request metadata echoed into history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub content: String,
    #[serde(rename = "type")]
    pub tool: ToolKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl GenerationResult {
    /// Stamp `content` with the originating request's metadata.
    pub fn new(request: &GenerationRequest, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool: request.tool,
            topic: request.topic().map(str::to_string),
            category: request.field("category"),
            timestamp: Utc::now(),
        }
    }

    /// Short label for listings: the topic, else the category, else the tool.
    pub fn headline(&self) -> String {
        self.topic
            .clone()
            .or_else(|| self.category.clone())
            .unwrap_or_else(|| self.tool.to_string())
    }
}
