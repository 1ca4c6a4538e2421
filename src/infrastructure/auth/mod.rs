mod password;
mod session_token;

pub use password::BcryptPasswordHasher;
pub use session_token::{SessionClaims, SessionKeys, SessionTokenError};
