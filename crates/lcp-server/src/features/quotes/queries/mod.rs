//! Quote queries (read operations)

pub mod list;
