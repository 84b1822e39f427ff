//! Category queries (read operations)

pub mod get;
pub mod list;
