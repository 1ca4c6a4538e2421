use std::sync::Arc;

use pagesmith::application::services::{AccountError, AccountService};
use pagesmith::domain::User;

use super::support::{InMemoryUserRepository, PlainHasher};

fn service() -> (Arc<InMemoryUserRepository>, AccountService) {
    let repository = Arc::new(InMemoryUserRepository::new());
    let service = AccountService::new(repository.clone(), Arc::new(PlainHasher));
    (repository, service)
}

#[tokio::test]
async fn given_new_email_when_signing_up_then_user_is_stored_with_hashed_password() {
    let (repository, service) = service();

    let user = service
        .signup("a@example.com", "secret")
        .await
        .expect("signup should succeed");

    assert_eq!(user.email, "a@example.com");
    assert_ne!(user.password_hash, "secret");

    let stored = repository.users.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].password_hash, "hashed:secret");
}

#[tokio::test]
async fn given_missing_fields_when_signing_up_then_missing_credentials() {
    let (_, service) = service();

    assert!(matches!(
        service.signup("", "secret").await,
        Err(AccountError::MissingCredentials)
    ));
    assert!(matches!(
        service.signup("a@example.com", "").await,
        Err(AccountError::MissingCredentials)
    ));
}

#[tokio::test]
async fn given_registered_email_when_signing_up_then_email_taken() {
    let (repository, service) = service();
    repository.users.lock().unwrap().push(User::new(
        "a@example.com".to_string(),
        "hashed:other".to_string(),
    ));

    assert!(matches!(
        service.signup("a@example.com", "secret").await,
        Err(AccountError::EmailTaken)
    ));
}

#[tokio::test]
async fn given_valid_credentials_when_authenticating_then_user_is_returned() {
    let (_, service) = service();
    service.signup("a@example.com", "secret").await.unwrap();

    let user = service
        .authenticate("a@example.com", "secret")
        .await
        .expect("authentication should succeed");
    assert_eq!(user.email, "a@example.com");
}

#[tokio::test]
async fn given_wrong_password_when_authenticating_then_invalid_credentials() {
    let (_, service) = service();
    service.signup("a@example.com", "secret").await.unwrap();

    assert!(matches!(
        service.authenticate("a@example.com", "wrong").await,
        Err(AccountError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn given_unknown_email_when_authenticating_then_invalid_credentials() {
    let (_, service) = service();

    assert!(matches!(
        service.authenticate("nobody@example.com", "secret").await,
        Err(AccountError::InvalidCredentials)
    ));
}
