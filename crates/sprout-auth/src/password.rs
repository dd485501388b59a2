//! Password hashing and validation

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use sprout_common::config::PasswordRequirements;
use sprout_common::error::{Error, Result};

/// Hash a password with a fresh salt
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::InternalError(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a stored hash
pub fn verify(password: &str, hash: &str) -> Result<()> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| Error::InternalError("Invalid password hash".to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| Error::InvalidCredentials)
}

/// Check a candidate password against the configured requirements
pub fn validate(password: &str, req: &PasswordRequirements) -> Result<()> {
    let mut errors = Vec::new();

    if password.len() < req.min_length {
        errors.push(format!("minimum {} characters", req.min_length));
    }
    if req.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
        errors.push("at least one uppercase letter".to_string());
    }
    if req.require_numbers && !password.chars().any(|c| c.is_numeric()) {
        errors.push("at least one number".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::WeakPassword(format!(
            "Password must have {}",
            errors.join(", ")
        )))
    }
}
