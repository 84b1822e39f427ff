//! HTTP API layer

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
