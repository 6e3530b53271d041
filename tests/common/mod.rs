//! Shared test helpers and mock generators.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use lettrics::error::{LettricsError, Result};
use lettrics::generation::Generator;
use lettrics::provider::RemoteGenerator;
use lettrics::request::ShapedRequest;
use lettrics::types::{GenerationRequest, ToolKind};

/// A mock generator that returns queued replies in order.
#[derive(Default)]
pub struct MockGenerator {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<ShapedRequest>>,
}

impl MockGenerator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a raw reply body.
    pub fn queue_reply(&self, body: &str) {
        self.replies.lock().unwrap().push_back(Ok(body.to_string()));
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: LettricsError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<ShapedRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteGenerator for MockGenerator {
    async fn fetch(&self, request: &ShapedRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LettricsError::Remote("no reply queued".into())))
    }
}

/// A generator whose calls never complete.
pub struct PendingGenerator;

#[async_trait]
impl RemoteGenerator for PendingGenerator {
    async fn fetch(&self, _request: &ShapedRequest) -> Result<String> {
        std::future::pending::<()>().await;
        unreachable!("pending future completed")
    }
}

pub fn generator_with(remote: Arc<dyn RemoteGenerator>) -> Generator {
    Generator::new(remote)
}

pub fn haiku_request() -> GenerationRequest {
    GenerationRequest::new(ToolKind::Poem)
        .with_topic("autumn")
        .with_param("style", "Haiku")
        .with_param("mood", "Melancholic")
        .with_param("length", "Short")
}

pub fn application_request() -> GenerationRequest {
    GenerationRequest::new(ToolKind::Application)
        .with_param("category", "school")
        .with_param("type", "Sick Leave")
        .with_param("receiver", "Sir")
        .with_param("name", "Asha")
}
