//! Product queries (read operations)

pub mod export_csv;
pub mod get;
pub mod list;
