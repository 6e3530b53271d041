//! The `{success, reply, error}` envelope used by the generation endpoints.

use serde::Deserialize;

/// Structured reply body. Missing members decode to their defaults so
/// `{"success":false}` is still an envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope {
    /// Decode `body` as an envelope; `None` when it is not a JSON object of
    /// that shape.
    pub fn decode(body: &str) -> Option<Self> {
        let trimmed = body.trim_start();
        if !trimmed.starts_with('{') {
            return None;
        }
        serde_json::from_str(trimmed).ok()
    }

    /// The reply of a successful envelope, when non-empty.
    pub fn successful_reply(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.reply.as_deref().filter(|reply| !reply.is_empty())
    }
}
