//! reqwest-backed [`RemoteGenerator`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::config::{HttpMethod, LettricsConfig};
use crate::error::{LettricsError, Result};
use crate::format::envelope::Envelope;
use crate::request::{ReplyShape, ShapedRequest};

use super::http::{build_client, no_cache_headers, status_to_error};
use super::RemoteGenerator;

/// Calls the configured generation endpoint for each tool.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: reqwest::Client,
    config: Arc<LettricsConfig>,
}

impl HttpGenerator {
    /// Build a generator with its own client honouring the configured timeout.
    pub fn new(config: Arc<LettricsConfig>) -> Result<Self> {
        let client = build_client(config.request_timeout())?;
        Ok(Self { client, config })
    }

    /// Build a generator around an existing client.
    pub fn with_client(client: reqwest::Client, config: Arc<LettricsConfig>) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &LettricsConfig {
        &self.config
    }
}

#[async_trait]
impl RemoteGenerator for HttpGenerator {
    async fn fetch(&self, request: &ShapedRequest) -> Result<String> {
        let endpoint = self.config.endpoint(request.tool);

        let mut params = request.query.clone();
        params.push((request.nonce_param.to_string(), Uuid::new_v4().to_string()));

        debug!(
            tool = %request.tool,
            url = %endpoint.url,
            method = %endpoint.method,
            "calling generation endpoint"
        );

        let builder = match endpoint.method {
            HttpMethod::Get => self.client.get(&endpoint.url).query(&params),
            HttpMethod::Post => self.client.post(&endpoint.url).form(&params),
        };
        let response = builder.headers(no_cache_headers()).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_to_error(status.as_u16(), &body));
        }

        decode_reply(&body, request.reply)
    }
}

/// Interpret a successful response body.
///
/// Envelopes are tried first. A failed envelope carries the upstream error;
/// bodies that are not envelopes are plain text unless the tool requires
/// one.
pub fn decode_reply(body: &str, shape: ReplyShape) -> Result<String> {
    if let Some(envelope) = Envelope::decode(body) {
        if !envelope.success {
            let message = envelope
                .error
                .filter(|error| !error.trim().is_empty())
                .unwrap_or_else(|| "endpoint reported failure".to_string());
            return Err(LettricsError::Remote(message));
        }
        return envelope
            .reply
            .filter(|reply| !reply.trim().is_empty())
            .ok_or_else(|| LettricsError::Remote("endpoint returned an empty reply".into()));
    }

    match shape {
        ReplyShape::Envelope => Err(LettricsError::MalformedResponse(
            "expected a {success, reply} object".into(),
        )),
        ReplyShape::TextOrEnvelope if body.trim().is_empty() => {
            Err(LettricsError::Remote("endpoint returned an empty reply".into()))
        }
        ReplyShape::TextOrEnvelope => Ok(body.to_string()),
    }
}
