//! Product commands (write operations)

pub mod bulk_import;
pub mod create;
pub mod delete;
pub mod update;
