mod mock_completion_client;
mod streaming_client;

pub use mock_completion_client::MockCompletionClient;
pub use streaming_client::StreamingCompletionClient;
