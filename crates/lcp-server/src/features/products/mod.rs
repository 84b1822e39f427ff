//! Products feature
//!
//! Product CRUD, public catalog browsing, and the CSV bulk import/export
//! pipeline (the engineering core of the back-office).

pub mod commands;
pub mod import;
pub mod queries;
pub mod routes;
pub mod types;

pub use types::{CandidateProduct, Product};
