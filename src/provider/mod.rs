//! Remote generation client seam and its HTTP implementation.

pub mod http;
pub mod remote;

pub use remote::HttpGenerator;

use async_trait::async_trait;

use crate::error::Result;
use crate::request::ShapedRequest;

/// Something that can turn a shaped request into a raw reply.
///
/// Implementations return the reply text before normalization. A reply the
/// endpoint marks as failed must come back as an error, not as text.
#[async_trait]
pub trait RemoteGenerator: Send + Sync {
    async fn fetch(&self, request: &ShapedRequest) -> Result<String>;
}
