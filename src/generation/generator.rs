use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::LettricsConfig;
use crate::error::{LettricsError, Result};
use crate::format::{normalize_with, NormalizerProfile};
use crate::provider::{HttpGenerator, RemoteGenerator};
use crate::request::{build_request, fallback_content};
use crate::types::{GenerationOutcome, GenerationRequest};

/// Turns requests into display-ready content.
///
/// Only validation problems surface as errors. Any failure after a request
/// has been shaped (transport, upstream error, unusable reply, cancellation)
/// produces the tool's fallback template instead.
#[derive(Clone)]
pub struct Generator {
    remote: Arc<dyn RemoteGenerator>,
}

impl Generator {
    pub fn new(remote: Arc<dyn RemoteGenerator>) -> Self {
        Self { remote }
    }

    /// A generator backed by [`HttpGenerator`] for `config`.
    pub fn from_config(config: Arc<LettricsConfig>) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpGenerator::new(config)?)))
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome> {
        self.run(request, None).await
    }

    /// Like [`generate`](Self::generate), abandoning the remote call once
    /// `cancel` fires.
    pub async fn generate_cancellable(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<GenerationOutcome> {
        self.run(request, Some(cancel)).await
    }

    /// Content for `request`, whatever happens. Invalid requests get the
    /// fallback template too.
    pub async fn generate_text(&self, request: &GenerationRequest) -> String {
        match self.generate(request).await {
            Ok(outcome) => outcome.into_content(),
            Err(err) => {
                warn!(tool = %request.tool, error = %err, "invalid request, using fallback");
                fallback_for(request)
            }
        }
    }

    async fn run(
        &self,
        request: &GenerationRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<GenerationOutcome> {
        let shaped = build_request(request)?;
        let profile = NormalizerProfile::for_tool(request.tool);

        let fetched = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(LettricsError::Cancelled),
                    reply = self.remote.fetch(&shaped) => reply,
                }
            }
            None => self.remote.fetch(&shaped).await,
        };

        let normalized = fetched.and_then(|raw| {
            let content = normalize_with(&raw, &profile);
            if content.is_empty() {
                Err(LettricsError::Remote("reply normalized to empty text".into()))
            } else {
                Ok(content)
            }
        });

        Ok(match normalized {
            Ok(content) => {
                info!(tool = %request.tool, chars = content.chars().count(), "generated content");
                GenerationOutcome::Remote { content }
            }
            Err(cause) => {
                warn!(tool = %request.tool, error = %cause, "remote generation failed, using fallback");
                GenerationOutcome::Fallback {
                    content: fallback_for(request),
                    cause,
                }
            }
        })
    }
}

fn fallback_for(request: &GenerationRequest) -> String {
    normalize_with(
        &fallback_content(request),
        &NormalizerProfile::for_tool(request.tool),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::request::ShapedRequest;
    use crate::types::ToolKind;

    struct Canned {
        reply: fn() -> Result<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RemoteGenerator for Canned {
        async fn fetch(&self, _request: &ShapedRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    fn generator(reply: fn() -> Result<String>) -> (Arc<Canned>, Generator) {
        let remote = Arc::new(Canned {
            reply,
            calls: AtomicUsize::new(0),
        });
        (remote.clone(), Generator::new(remote))
    }

    #[tokio::test]
    async fn remote_reply_is_normalized() {
        let (_, generator) = generator(|| Ok("# first\n# second".into()));
        let request = GenerationRequest::new(ToolKind::Report)
            .with_topic("Flood")
            .with_param("context", "River rose")
            .with_param("date", "2024-07-01");
        let outcome = generator.generate(&request).await.unwrap();
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.content(), "➥ first\n\n\n➥ second");
    }

    #[tokio::test]
    async fn validation_errors_skip_the_remote() {
        let (remote, generator) = generator(|| Ok("unused".into()));
        let err = generator
            .generate(&GenerationRequest::new(ToolKind::Essay))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn whitespace_reply_falls_back() {
        let (_, generator) = generator(|| Ok("<p> </p>".into()));
        let request = GenerationRequest::new(ToolKind::Thesis).with_topic("Tides");
        let outcome = generator.generate(&request).await.unwrap();
        assert!(outcome.is_fallback());
        assert!(outcome.content().starts_with("THESIS STATEMENT: Tides"));
    }

    #[tokio::test]
    async fn generate_text_never_fails() {
        let (_, generator) = generator(|| Err(LettricsError::Remote("down".into())));
        let text = generator
            .generate_text(&GenerationRequest::new(ToolKind::Application))
            .await;
        assert!(text.contains("Sir/Madam"));
    }
}
