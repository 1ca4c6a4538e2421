use std::sync::Arc;

use crate::application::ports::{
    PasswordHashError, PasswordHasher, RepositoryError, UserRepository,
};
use crate::domain::User;

/// Signup and credential verification over the user store.
pub struct AccountService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, AccountError> {
        if email.is_empty() || password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }

        if self.user_repository.find_by_email(email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        let password_hash = self.password_hasher.hash(password)?;
        let user = User::new(email.to_string(), password_hash);

        match self.user_repository.create(&user).await {
            Ok(()) => Ok(user),
            // Two signups can race past the lookup; the unique index settles it.
            Err(RepositoryError::ConstraintViolation(_)) => Err(AccountError::EmailTaken),
            Err(e) => Err(AccountError::Repository(e)),
        }
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self.password_hasher.verify(password, &user.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("user already exists")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("hashing: {0}")]
    Hashing(#[from] PasswordHashError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}
