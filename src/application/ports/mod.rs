mod completion_client;
mod message_repository;
mod password_hasher;
mod repository_error;
mod user_repository;

pub use completion_client::{CompletionClient, CompletionError, CompletionTokenStream};
pub use message_repository::MessageRepository;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use repository_error::RepositoryError;
pub use user_repository::UserRepository;
