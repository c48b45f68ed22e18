//! Credential hashing with bcrypt
//!
//! The hash output self-describes algorithm and cost (`$2b$12$...`), so
//! verification needs no side-channel.

use crate::constants::BCRYPT_COST;
use precinct_domain::error::{Error, Result};

/// Hash a plaintext password
pub fn hash_password(plaintext: &str) -> Result<String> {
    bcrypt::hash(plaintext, BCRYPT_COST).map_err(|e| {
        Error::authentication_with_source("Password hashing failed", e)
    })
}

/// Verify a plaintext password against a stored hash
///
/// A malformed or empty hash yields `false`, never an error; a corrupt
/// stored hash must not surface as an unhandled error on the login path.
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    if hash.is_empty() {
        return false;
    }
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}

/// Password strength requirements
///
/// Applied to candidate passwords before the similarity guard; login never
/// consults this.
pub struct PasswordPolicy {
    /// Minimum password length
    pub min_length: usize,
    /// Require uppercase letters
    pub require_uppercase: bool,
    /// Require lowercase letters
    pub require_lowercase: bool,
    /// Require digits
    pub require_digit: bool,
    /// Require special characters
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: false,
        }
    }
}

impl PasswordPolicy {
    /// Validate a password against the policy
    pub fn validate(&self, password: &str) -> std::result::Result<(), Vec<&'static str>> {
        let mut errors = Vec::new();

        if password.chars().count() < self.min_length {
            errors.push("Password too short");
        }

        if self.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
            errors.push("Password must contain uppercase letter");
        }

        if self.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
            errors.push("Password must contain lowercase letter");
        }

        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("Password must contain digit");
        }

        if self.require_special
            && !password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
        {
            errors.push("Password must contain special character");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
