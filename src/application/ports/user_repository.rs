use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `ConstraintViolation` when the email
    /// is already registered.
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}
