//! Credential hashing.
//!
//! Passwords are stored as argon2id PHC strings. Each hash carries its own
//! salt and parameters, so verification needs nothing beyond the stored
//! string itself.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::types::{HearthError, Result};

/// Hash a plaintext password into a PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| HearthError::Internal(format!("Password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Check a plaintext password against a stored PHC string.
///
/// A wrong password is `Ok(false)`; only an unparseable stored hash is an
/// error, since that means the snapshot holds a corrupt credential.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| HearthError::Internal(format!("Stored credential is malformed: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let hash = hash_password("quiet-river-morning-tea").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("quiet-river-morning-tea", &hash).unwrap());
        assert!(!verify_password("loud-river-evening-tea", &hash).unwrap());
    }

    #[test]
    fn test_each_hash_gets_its_own_salt() {
        let first = hash_password("repeat-after-me").unwrap();
        let second = hash_password("repeat-after-me").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("repeat-after-me", &first).unwrap());
        assert!(verify_password("repeat-after-me", &second).unwrap());
    }

    #[test]
    fn test_corrupt_stored_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("password", "not-a-phc-string").is_err());
    }
}
