//! Shared validation utilities
//!
//! Common field validators used by commands across feature slices.

use lcp_common::slug::slugify;
use thiserror::Error;

/// Errors that can occur during slug validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    #[error("Slug is required and cannot be empty")]
    Required,

    #[error("Slug must be between 1 and {max_length} characters")]
    TooLong { max_length: usize },

    #[error("Slug can only contain lowercase letters, numbers, and single hyphens, with no leading or trailing hyphen")]
    InvalidFormat,
}

/// Errors that can occur during name validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    #[error("{field} is required and cannot be empty")]
    Required { field: &'static str },

    #[error("{field} must be between 1 and {max_length} characters")]
    TooLong {
        field: &'static str,
        max_length: usize,
    },
}

/// Errors that can occur during email validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    #[error("Email address is required")]
    Required,

    #[error("Email address is not valid")]
    InvalidFormat,
}

/// Validate a slug (URL-safe identifier).
///
/// A slug is valid when it is non-empty, within `max_length`, and already in
/// canonical slug form, meaning `slugify` leaves it unchanged.
pub fn validate_slug(slug: &str, max_length: usize) -> Result<(), SlugValidationError> {
    if slug.is_empty() {
        return Err(SlugValidationError::Required);
    }

    if slug.len() > max_length {
        return Err(SlugValidationError::TooLong { max_length });
    }

    if slugify(slug) != slug {
        return Err(SlugValidationError::InvalidFormat);
    }

    Ok(())
}

/// Validate a required text field (non-empty after trimming, bounded length).
pub fn validate_text(
    value: &str,
    field: &'static str,
    max_length: usize,
) -> Result<(), NameValidationError> {
    if value.trim().is_empty() {
        return Err(NameValidationError::Required { field });
    }

    if value.len() > max_length {
        return Err(NameValidationError::TooLong { field, max_length });
    }

    Ok(())
}

/// Validate an email address.
///
/// Deliberately shallow: one `@` with something on both sides and no
/// whitespace. Deliverability is the mail server's problem.
pub fn validate_email(email: &str) -> Result<(), EmailValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(EmailValidationError::Required);
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(EmailValidationError::InvalidFormat);
    }

    if email.chars().any(char::is_whitespace) {
        return Err(EmailValidationError::InvalidFormat);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug_valid() {
        assert!(validate_slug("valid-slug", 100).is_ok());
        assert!(validate_slug("traction-sheave-400", 100).is_ok());
        assert!(validate_slug("a", 100).is_ok());
        assert!(validate_slug("123", 100).is_ok());
    }

    #[test]
    fn test_validate_slug_empty() {
        assert_eq!(validate_slug("", 100), Err(SlugValidationError::Required));
    }

    #[test]
    fn test_validate_slug_too_long() {
        let long_slug = "a".repeat(101);
        assert_eq!(
            validate_slug(&long_slug, 100),
            Err(SlugValidationError::TooLong { max_length: 100 })
        );
    }

    #[test]
    fn test_validate_slug_invalid_chars() {
        assert_eq!(validate_slug("UPPERCASE", 100), Err(SlugValidationError::InvalidFormat));
        assert_eq!(validate_slug("has spaces", 100), Err(SlugValidationError::InvalidFormat));
        assert_eq!(validate_slug("has_underscore", 100), Err(SlugValidationError::InvalidFormat));
        assert_eq!(validate_slug("-leading", 100), Err(SlugValidationError::InvalidFormat));
        assert_eq!(validate_slug("trailing-", 100), Err(SlugValidationError::InvalidFormat));
        assert_eq!(validate_slug("double--hyphen", 100), Err(SlugValidationError::InvalidFormat));
    }

    #[test]
    fn test_validate_text() {
        assert!(validate_text("Traction sheave", "name", 256).is_ok());
        assert_eq!(
            validate_text("   ", "name", 256),
            Err(NameValidationError::Required { field: "name" })
        );
        let long = "a".repeat(257);
        assert_eq!(
            validate_text(&long, "name", 256),
            Err(NameValidationError::TooLong { field: "name", max_length: 256 })
        );
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("buyer@example.com").is_ok());
        assert!(validate_email(" padded@example.com ").is_ok());
        assert_eq!(validate_email(""), Err(EmailValidationError::Required));
        assert_eq!(validate_email("no-at-sign"), Err(EmailValidationError::InvalidFormat));
        assert_eq!(validate_email("@example.com"), Err(EmailValidationError::InvalidFormat));
        assert_eq!(validate_email("user@"), Err(EmailValidationError::InvalidFormat));
        assert_eq!(validate_email("user@nodot"), Err(EmailValidationError::InvalidFormat));
        assert_eq!(validate_email("a b@example.com"), Err(EmailValidationError::InvalidFormat));
    }
}
