//! CLI command implementations

pub mod export;
pub mod import;
pub mod status;
pub mod template;
