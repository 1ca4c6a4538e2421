mod chat;
mod health;
mod messages;
mod signin;
mod signup;

pub use chat::{ChatRequest, TurnPayload, chat_handler};
pub use health::health_handler;
pub use messages::{delete_message_handler, list_messages_handler};
pub use signin::signin_handler;
pub use signup::signup_handler;

use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
