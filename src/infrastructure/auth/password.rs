use crate::application::ports::{PasswordHashError, PasswordHasher};

/// Work factor of 12, matching the rest of the stack's signup contract.
const HASH_COST: u32 = 12;

pub struct BcryptPasswordHasher;

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, PasswordHashError> {
        bcrypt::hash(plain, HASH_COST).map_err(|e| PasswordHashError(e.to_string()))
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool, PasswordHashError> {
        bcrypt::verify(plain, hash).map_err(|e| PasswordHashError(e.to_string()))
    }
}
