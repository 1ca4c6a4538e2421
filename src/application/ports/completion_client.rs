use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::Stream;

pub type CompletionTokenStream =
    Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send + 'static>>;

/// Remote text-generation provider. The client is constructed once at
/// startup and injected wherever a completion is needed, so tests can
/// substitute a fake.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Open a streaming completion for `prompt` under the given system
    /// instruction. Tokens arrive in provider order; the stream ends when the
    /// provider signals completion or yields an error item.
    async fn complete_stream(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<CompletionTokenStream, CompletionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
