//! Database error handling utilities
//!
//! Helpers for telling unique-constraint violations (slug collisions) apart
//! from other database failures.

use sqlx::Error as SqlxError;

/// Check if the error is a unique constraint violation
pub fn is_unique_violation(error: &SqlxError) -> bool {
    if let SqlxError::Database(db_err) = error {
        return db_err.is_unique_violation();
    }
    false
}

/// Map a unique constraint violation to a domain error.
///
/// If the error is a unique violation, returns `unique_error`; otherwise
/// wraps the original error with `default_wrapper`.
pub fn map_unique_violation<E, F>(error: SqlxError, unique_error: E, default_wrapper: F) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    if is_unique_violation(&error) {
        unique_error
    } else {
        default_wrapper(error)
    }
}
