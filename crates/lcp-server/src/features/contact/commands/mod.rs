//! Contact commands (write operations)

pub mod submit;
