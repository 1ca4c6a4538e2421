mod pg_message_repository;
mod pg_pool;
mod pg_user_repository;

pub use pg_message_repository::PgMessageRepository;
pub use pg_pool::create_pool;
pub use pg_user_repository::PgUserRepository;
