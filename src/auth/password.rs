//! Salted password hashing and verification.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::error;

/// Hash a plaintext password with a fresh random salt.
///
/// Uses Argon2id with the library's default parameters; the cost factor is
/// not configurable.
pub fn hash_password(plaintext: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| format!("Failed to hash password: {}", e))
}

/// Compare a plaintext candidate against a stored PHC-format hash.
///
/// The comparison runs the full Argon2 derivation regardless of where the
/// inputs diverge, so it does not leak match position through timing.
/// A stored hash that fails to parse counts as a mismatch.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    let parsed = match PasswordHash::new(stored_hash) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Stored password hash is malformed: {}", e);
            return false;
        }
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
