//! Quotes feature
//!
//! The public configurator submits quote requests: a product kind plus the
//! selected options as a JSON object. Each request gets a unique reference
//! the customer can quote back.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use types::QuoteRequest;
