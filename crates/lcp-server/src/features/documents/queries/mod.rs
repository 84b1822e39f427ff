//! Document queries (read operations)

pub mod download;
pub mod list;
