//! Capped, newest-first record of past generations.

mod file;
mod memory;

pub use file::FileHistoryStore;
pub use memory::MemoryHistoryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LettricsError, Result};
use crate::types::{GenerationResult, ToolKind};

/// Items kept before the oldest are evicted.
pub const DEFAULT_CAPACITY: usize = 50;

/// One stored generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub tool: ToolKind,
    pub topic: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryItem {
    pub fn new(tool: ToolKind, topic: impl Into<String>, content: impl Into<String>) -> Self {
        let timestamp = Utc::now();
        Self {
            id: millis(&timestamp),
            tool,
            topic: topic.into(),
            content: content.into(),
            timestamp,
        }
    }

    /// Record for `result`, id derived from its timestamp. Tools without a
    /// topic store their headline (the application category) instead.
    pub fn from_result(result: &GenerationResult) -> Self {
        Self {
            id: millis(&result.timestamp),
            tool: result.tool,
            topic: result.headline(),
            content: result.content.clone(),
            timestamp: result.timestamp,
        }
    }
}

fn millis(timestamp: &DateTime<Utc>) -> u64 {
    u64::try_from(timestamp.timestamp_millis()).unwrap_or(0)
}

/// Storage port for history.
///
/// `append` may rewrite the item's id to keep ids unique; the stored item is
/// returned.
pub trait HistoryStore: Send + Sync {
    fn append(&self, item: HistoryItem) -> Result<HistoryItem>;
    /// Remove by id. `Ok(false)` when nothing matched.
    fn remove(&self, id: u64) -> Result<bool>;
    /// Items newest-first, optionally only those of one tool.
    fn list(&self, tool: Option<ToolKind>) -> Result<Vec<HistoryItem>>;
}

/// In-memory log shared by both stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct HistoryLog {
    #[serde(default)]
    last_id: u64,
    #[serde(default)]
    items: Vec<HistoryItem>,
}

impl HistoryLog {
    /// Fails once the id space is exhausted rather than wrapping to a used id.
    fn append(&mut self, mut item: HistoryItem, capacity: usize) -> Result<HistoryItem> {
        let high_water = self
            .items
            .iter()
            .map(|existing| existing.id)
            .fold(self.last_id, u64::max);
        if item.id <= high_water {
            item.id = high_water
                .checked_add(1)
                .ok_or_else(|| LettricsError::History("history ids exhausted".into()))?;
        }
        self.last_id = item.id;
        self.items.insert(0, item.clone());
        self.items.truncate(capacity.max(1));
        Ok(item)
    }

    fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    fn list(&self, tool: Option<ToolKind>) -> Vec<HistoryItem> {
        self.items
            .iter()
            .filter(|item| tool.map_or(true, |tool| item.tool == tool))
            .cloned()
            .collect()
    }
}
