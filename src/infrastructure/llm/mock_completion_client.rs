use async_trait::async_trait;

use crate::application::ports::{CompletionClient, CompletionError, CompletionTokenStream};

/// Canned provider for tests and scaffolding: replays a fixed token
/// sequence, or fails the whole call.
pub struct MockCompletionClient {
    tokens: Vec<String>,
    fail_call: bool,
}

impl MockCompletionClient {
    pub fn with_tokens(tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            fail_call: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            tokens: Vec::new(),
            fail_call: true,
        }
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete_stream(
        &self,
        _system: &str,
        _prompt: &str,
    ) -> Result<CompletionTokenStream, CompletionError> {
        if self.fail_call {
            return Err(CompletionError::ApiRequestFailed(
                "mock provider unavailable".to_string(),
            ));
        }

        let tokens: Vec<Result<String, CompletionError>> =
            self.tokens.iter().cloned().map(Ok).collect();
        Ok(Box::pin(futures::stream::iter(tokens)))
    }
}
