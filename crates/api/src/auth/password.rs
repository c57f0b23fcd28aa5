//! Password hashing.
//!
//! Hashes are Argon2id in PHC string format, so the parameters and salt
//! travel inside the stored value and verification needs no extra state.
//! Plaintext never touches the database.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

type HashError = argon2::password_hash::Error;

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a plaintext password against a stored PHC hash.
///
/// A mismatch is `Ok(false)`; `Err` is reserved for malformed hashes and
/// other operational failures.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_verifies() {
        let hash = hash_password("Tr4cker!").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "PHC string, argon2id variant");
        assert!(verify_password("Tr4cker!", &hash).expect("verify should succeed"));
    }

    #[test]
    fn mismatch_is_false_not_error() {
        let hash = hash_password("Tr4cker!").expect("hashing should succeed");
        assert!(!verify_password("tr4cker!", &hash).expect("verify should succeed"));
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn salts_are_random() {
        let a = hash_password("Same1nput").expect("hashing should succeed");
        let b = hash_password("Same1nput").expect("hashing should succeed");
        assert_ne!(a, b);
    }
}
