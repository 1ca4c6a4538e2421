use pagesmith::domain::User;
use pagesmith::infrastructure::auth::SessionKeys;

fn test_user() -> User {
    User::new("a@example.com".to_string(), "hash".to_string())
}

#[test]
fn given_issued_token_then_verification_returns_the_same_identity() {
    let keys = SessionKeys::new("test-secret", 1);
    let user = test_user();

    let token = keys.issue(&user).expect("issuing should succeed");
    let claims = keys.verify(&token).expect("verification should succeed");

    assert_eq!(claims.user_id(), user.id);
    assert_eq!(claims.email, user.email);
}

#[test]
fn given_tampered_token_then_verification_fails() {
    let keys = SessionKeys::new("test-secret", 1);
    let token = keys.issue(&test_user()).unwrap();

    let mut tampered = token.clone();
    tampered.push('x');
    assert!(keys.verify(&tampered).is_err());
}

#[test]
fn given_token_signed_with_other_secret_then_verification_fails() {
    let issuing = SessionKeys::new("secret-one", 1);
    let verifying = SessionKeys::new("secret-two", 1);

    let token = issuing.issue(&test_user()).unwrap();
    assert!(verifying.verify(&token).is_err());
}

#[test]
fn given_garbage_token_then_verification_fails() {
    let keys = SessionKeys::new("test-secret", 1);

    assert!(keys.verify("not.a.token").is_err());
    assert!(keys.verify("").is_err());
}
