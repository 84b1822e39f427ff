//! Categories feature
//!
//! Category CRUD and public browsing. Categories order the public catalog
//! navigation; products reference them weakly, so deleting a category
//! detaches its products instead of deleting them.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use types::Category;
