//! Document commands (write operations)

pub mod delete;
pub mod upload;
