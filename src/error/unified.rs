//! Error classification shared by the orchestrator and the HTTP layer.

use serde::{Deserialize, Serialize};

/// Broad error category for routing recovery logic.
///
/// `Validation` is the only category surfaced to end users; everything in
/// `Remote` is absorbed by fallback content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    Remote,
    Configuration,
    Storage,
    Unknown,
}
