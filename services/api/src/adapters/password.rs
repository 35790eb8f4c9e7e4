//! services/api/src/adapters/password.rs
//!
//! Argon2 implementation of the `PasswordService` port.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use course_shop_core::ports::{PasswordService, PortError, PortResult};
use tracing::error;

#[derive(Clone, Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> PortResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PortError::Unexpected(format!("failed to hash password: {e}")))
    }

    fn verify(&self, password: &str, password_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(password_hash) {
            Ok(hash) => hash,
            Err(e) => {
                error!("Failed to parse password hash: {:?}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}
