//! Password value object - Argon2 hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Well-formed Argon2id PHC string whose digest was not derived from any password.
const UNMATCHABLE_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c2VlZGVkc2FsdHZhbHVl$3G5mXgYQ3PhTn4wq0uH2m2yqJbQy8m6a4oZbT6aQ0sA";

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a new plain-text password.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than the minimum length.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// A well-formed hash that matches no password. Verifying against it costs
    /// the same as verifying against a real one.
    pub fn unmatchable() -> Self {
        Self::from_hash(UNMATCHABLE_HASH)
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check a plain-text candidate. Malformed hashes never match.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let password = Password::new("admin123").unwrap();

        assert!(password.verify("admin123"));
        assert!(!password.verify("admin124"));
    }

    #[test]
    fn test_password_from_hash_round_trips_through_storage() {
        let stored = Password::new("groceries!").unwrap().into_string();

        let restored = Password::from_hash(stored);
        assert!(restored.verify("groceries!"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let first = Password::new("user123").unwrap();
        let second = Password::new("user123").unwrap();

        assert!(first.verify("user123"));
        assert!(second.verify("user123"));
        assert_ne!(first.into_string(), second.into_string());
    }

    #[test]
    fn test_password_too_short() {
        assert!(matches!(Password::new("abc12"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_seeded_user_password_meets_minimum() {
        assert!(Password::new("user123").is_ok());
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let password = Password::from_hash("not-a-phc-string");
        assert!(!password.verify("anything"));
    }

    #[test]
    fn test_unmatchable_rejects_common_passwords() {
        let dummy = Password::unmatchable();
        for candidate in ["", "admin123", "user123", "unmatchable", "password"] {
            assert!(!dummy.verify(candidate));
        }
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("secret99").unwrap();
        assert!(format!("{:?}", password).contains("[REDACTED]"));
    }
}
