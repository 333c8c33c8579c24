//! Validation utilities for user input
//!
//! Checks run before any request leaves the client. Failures become
//! [`AppError::Validation`] through [`ValidationResult::into_result`].

use crate::core::error::{AppError, Result};

/// Message used when a form is submitted with blank fields.
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";

/// The identity provider refuses anything shorter.
pub const MIN_PASSWORD_LEN: usize = 6;

pub const MAX_NAME_LEN: usize = 64;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self.error {
            Some(message) if !self.is_valid => Err(AppError::Validation(message)),
            _ => Ok(()),
        }
    }
}

/// Fail with [`ALL_FIELDS_REQUIRED`] if any field is blank.
pub fn require_all(fields: &[&str]) -> ValidationResult {
    if fields.iter().any(|field| field.trim().is_empty()) {
        return ValidationResult::err(ALL_FIELDS_REQUIRED);
    }
    ValidationResult::ok()
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    let Some((user, domain)) = email.split_once('@') else {
        return ValidationResult::err("Invalid email format");
    };

    if domain.contains('@') {
        return ValidationResult::err("Invalid email format");
    }

    if user.is_empty() {
        return ValidationResult::err("Email username cannot be empty");
    }

    if domain.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

/// Validate a display name
pub fn validate_display_name(name: &str) -> ValidationResult {
    let name = name.trim();
    if name.is_empty() {
        return ValidationResult::err("Name is required");
    }

    if name.chars().count() > MAX_NAME_LEN {
        return ValidationResult::err(format!("Name must be at most {} characters", MAX_NAME_LEN));
    }

    ValidationResult::ok()
}

/// Validate a password being set (sign-up or change)
pub fn validate_new_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return ValidationResult::err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }

    ValidationResult::ok()
}
