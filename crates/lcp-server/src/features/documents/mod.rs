//! Documents feature
//!
//! PDF datasheet upload, listing, and download. Bytes live in the
//! [`crate::storage::DocumentStore`]; the `documents` table holds the
//! metadata and is the source of truth.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use types::Document;
