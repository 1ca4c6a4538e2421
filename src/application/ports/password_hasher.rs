#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashError(pub String);

/// Adaptive password digest. Hashing cost lives behind this seam so tests can
/// swap in a cheap implementation.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError>;

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
