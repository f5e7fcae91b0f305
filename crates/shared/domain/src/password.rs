//! Password encoding - one-way hashing of account secrets.
//!
//! The user record never stores a raw password: registration hands the raw
//! value to a [`PasswordEncoder`] and keeps only the resulting hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// One-way password hashing used at registration and login.
pub trait PasswordEncoder: Send + Sync {
    /// Hash a raw password for storage.
    fn encode(&self, raw: &str) -> DomainResult<String>;

    /// Check a raw password against a stored hash.
    fn matches(&self, raw: &str, encoded: &str) -> bool;
}

/// Argon2id encoder producing PHC-formatted hashes with a random salt.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordEncoder;

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn matches(&self, raw: &str, encoded: &str) -> bool {
        // Unparseable hashes never match
        let Ok(parsed) = PasswordHash::new(encoded) else {
            return false;
        };
        Self::argon2()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok()
    }
}
