//! Quote commands (write operations)

pub mod submit;
