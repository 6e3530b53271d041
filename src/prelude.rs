//! Convenience re-exports for common use.

pub use crate::config::LettricsConfig;
pub use crate::error::{ErrorCategory, LettricsError, Result};
pub use crate::format::{normalize, normalize_with, NormalizerProfile};
pub use crate::generation::Generator;
pub use crate::history::{FileHistoryStore, HistoryItem, HistoryStore, MemoryHistoryStore};
pub use crate::provider::{HttpGenerator, RemoteGenerator};
pub use crate::request::{build_request, fallback_content, ShapedRequest};
pub use crate::types::{GenerationOutcome, GenerationRequest, GenerationResult, ToolKind};
