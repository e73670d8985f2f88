//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Validate a user's display name
pub fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidName(name.to_string()));
    }
    if trimmed.len() > 120 {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() || email.len() > 254 {
        return Err(Error::InvalidEmail(email.to_string()));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(Error::InvalidEmail(email.to_string()));
    }

    Ok(())
}

/// Validate a raw password before hashing
pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(Error::InvalidPassword(
            "must be at least 8 characters long".to_string(),
        ));
    }
    if password.len() > 128 {
        return Err(Error::InvalidPassword(
            "must be at most 128 characters long".to_string(),
        ));
    }
    Ok(())
}
