//! Request shaping: per-tool validation, outbound query construction and
//! offline fallback templates.

pub mod builder;
pub mod catalog;
pub mod fallback;

pub use builder::{build_request, ShapedRequest};
pub use catalog::{tool_spec, FieldSpec, ReplyShape, ToolSpec, ValueRule, WireCase};
pub use fallback::fallback_content;
