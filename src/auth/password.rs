// SPDX-License-Identifier: AGPL-3.0-or-later

//! Password hashing with Argon2id.
//!
//! Hashes are stored in PHC string format, so the parameters travel with
//! the hash and can be tightened later without invalidating old records.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| format!("Failed to hash password: {e}"))
}

/// Verify a candidate password against a stored PHC-format hash.
///
/// An unparseable stored hash counts as a failed verification rather
/// than an error, so login never leaks storage details.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("Passw0rd!").unwrap();
        assert!(verify_password("Passw0rd!", &hash));
        assert!(!verify_password("Passw0rd?", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("Passw0rd!").unwrap();
        let b = hash_password("Passw0rd!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_fails_verification() {
        assert!(!verify_password("Passw0rd!", "not-a-phc-string"));
    }
}
