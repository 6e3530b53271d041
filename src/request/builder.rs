//! Validates a [`GenerationRequest`] against its catalog entry and shapes
//! the outbound query.

use tracing::debug;

use crate::error::{LettricsError, Result};
use crate::types::{GenerationRequest, ToolKind};

use super::catalog::{tool_spec, ReplyShape};

/// A validated request, ready for the remote client.
///
/// The cache-busting nonce is not part of the query; the client adds it
/// under `nonce_param` at send time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedRequest {
    pub tool: ToolKind,
    pub resource: &'static str,
    pub query: Vec<(String, String)>,
    pub reply: ReplyShape,
    pub nonce_param: &'static str,
}

impl ShapedRequest {
    /// Value of a wire parameter, for inspection.
    pub fn param(&self, wire: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == wire)
            .map(|(_, value)| value.as_str())
    }
}

/// Validate `request` and build its outbound query.
///
/// Fails fast with [`LettricsError::Validation`] listing every absent
/// required field; nothing is sent in that case.
pub fn build_request(request: &GenerationRequest) -> Result<ShapedRequest> {
    let spec = tool_spec(request.tool);

    let missing: Vec<&str> = spec
        .required
        .iter()
        .copied()
        .filter(|name| request.field(name).is_none())
        .collect();
    if !missing.is_empty() {
        debug!(tool = %request.tool, ?missing, "rejecting request with missing fields");
        return Err(LettricsError::missing(missing));
    }

    let query: Vec<(String, String)> = spec
        .fields
        .iter()
        .filter_map(|field| {
            field
                .label(request.field(field.name))
                .map(|label| (field.wire.to_string(), field.wire_value(&label)))
        })
        .collect();

    debug!(tool = %request.tool, params = query.len(), "shaped generation request");

    Ok(ShapedRequest {
        tool: request.tool,
        resource: spec.resource,
        query,
        reply: spec.reply,
        nonce_param: spec.nonce_param,
    })
}
