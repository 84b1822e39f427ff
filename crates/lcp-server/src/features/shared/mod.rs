//! Utilities shared across feature slices

pub mod error_helpers;
pub mod pagination;
pub mod validation;
