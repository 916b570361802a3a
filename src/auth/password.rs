//! Argon2id password hashing.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) with a random per-password
//! salt embedded, so the stored string is all that is needed to verify.

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use std::sync::OnceLock;
use tracing::warn;

static PLACEHOLDER_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Hash `password` with a freshly generated salt.
///
/// # Errors
/// Returns an error if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?
        .to_string();
    Ok(hash)
}

/// Check `password` against a stored PHC hash.
///
/// # Errors
/// Returns an error if `stored_hash` is not a valid PHC string.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| anyhow::anyhow!("invalid password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Verify `password` against a fixed placeholder hash and discard the result.
///
/// Used when the username is unknown so the lookup miss costs the same
/// Argon2 work as a wrong password.
pub fn verify_dummy(password: &str) {
    let hash = PLACEHOLDER_HASH.get_or_init(|| hash_password("keyhole-placeholder").ok());
    match hash {
        Some(hash) => {
            let _ = verify_password(password, hash);
        }
        None => warn!("placeholder hash unavailable"),
    }
}
