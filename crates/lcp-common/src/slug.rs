//! Slug generation
//!
//! Turns free-text display names into URL-safe identifiers used as the
//! public lookup key for products, categories, and documents.
//!
//! The transformation is pure and deterministic:
//!
//! 1. NFD-decompose and drop combining marks (`Câble` becomes `Cable`)
//! 2. lowercase
//! 3. replace every run of characters outside `[a-z0-9]` with one hyphen
//! 4. trim leading/trailing hyphens
//!
//! `slugify` never checks uniqueness; collision handling is the caller's
//! responsibility (the import executor reports collisions per row, the CRUD
//! commands surface them as conflicts).

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Derive a URL-safe slug from a display name.
///
/// The result contains only lowercase ASCII letters, digits, and single
/// hyphens, with no leading or trailing hyphen. Idempotent:
/// `slugify(slugify(x)) == slugify(x)`.
///
/// # Examples
///
/// ```
/// use lcp_common::slug::slugify;
///
/// assert_eq!(slugify("Traction Sheave 400mm"), "traction-sheave-400mm");
/// assert_eq!(slugify("  Guide -- Rail  "), "guide-rail");
/// assert_eq!(slugify("Éclairage cabine"), "eclairage-cabine");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut gap = false;

    for ch in name.nfd().filter(|c| !is_combining_mark(*c)) {
        for lower in ch.to_lowercase() {
            if lower.is_ascii_alphanumeric() {
                if gap && !slug.is_empty() {
                    slug.push('-');
                }
                gap = false;
                slug.push(lower);
            } else {
                gap = true;
            }
        }
    }

    slug
}

/// Check that a string already satisfies the slug grammar.
///
/// Used by validators that accept caller-supplied slugs instead of deriving
/// them from a name.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slugify(slug) == slug
}
