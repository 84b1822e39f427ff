//! Contact queries (read operations)

pub mod list;
