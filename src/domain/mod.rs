mod chat_turn;
mod message;
mod message_id;
mod turn_role;
mod user;
mod user_id;

pub use chat_turn::ChatTurn;
pub use message::Message;
pub use message_id::MessageId;
pub use turn_role::TurnRole;
pub use user::User;
pub use user_id::UserId;
