//! Password hashing and account validation
//!
//! Hashes are salted Argon2 in PHC string format. Validation covers format
//! rules only; uniqueness checks (username or email already taken) belong
//! to the storage layer.

use std::sync::OnceLock;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use regex::Regex;

use crate::{Error, Result};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 100;

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap())
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
///
/// Returns false for a wrong password; errors only when the stored hash
/// itself is unreadable.
pub fn verify_password(hash: &str, password: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Validate username format: 3-50 characters, letters, digits, underscores
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::Validation("Username is required".to_string()));
    }
    if username.len() < USERNAME_MIN {
        return Err(Error::Validation(format!(
            "Username must be at least {} characters long",
            USERNAME_MIN
        )));
    }
    if username.len() > USERNAME_MAX {
        return Err(Error::Validation(format!(
            "Username must be less than {} characters",
            USERNAME_MAX
        )));
    }
    if !username_re().is_match(username) {
        return Err(Error::Validation(
            "Username can only contain letters, numbers, and underscores".to_string(),
        ));
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::Validation("Email is required".to_string()));
    }
    if !email_re().is_match(email) {
        return Err(Error::Validation("Invalid email format".to_string()));
    }
    Ok(())
}

/// Validate password length: 6-100 characters
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::Validation("Password is required".to_string()));
    }
    if password.len() < PASSWORD_MIN {
        return Err(Error::Validation(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN
        )));
    }
    if password.len() > PASSWORD_MAX {
        return Err(Error::Validation(format!(
            "Password must be less than {} characters",
            PASSWORD_MAX
        )));
    }
    Ok(())
}
