//! Auth commands (write operations)

pub mod login;
