use chrono::{DateTime, Utc};

use super::{MessageId, UserId};

/// One persisted generation: the user's prompt and the full assistant
/// response. A row is created with an empty `response` the moment generation
/// starts and its `response` is overwritten exactly once when the stream
/// completes.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub user_id: UserId,
    pub prompt: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(user_id: UserId, prompt: String) -> Self {
        Self {
            id: MessageId::new(),
            user_id,
            prompt,
            response: String::new(),
            created_at: Utc::now(),
        }
    }
}
