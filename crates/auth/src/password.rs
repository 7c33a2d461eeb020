//! Argon2 password hashing.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Argon2,
};
use rand::RngCore;

use crate::AuthResult;

/// Hashes a password with Argon2id and a random salt.
///
/// The result is a PHC string (`$argon2id$v=19$...`) suitable for storing in
/// the users table or in configuration.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)?;

    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch. A stored hash that cannot be parsed is an
/// error, not a mismatch.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed_hash = PasswordHash::new(hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
