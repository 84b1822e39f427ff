//! Contact feature
//!
//! Public contact form with a honeypot spam trap, and an admin inbox.
//! Submissions caught by the honeypot are stored flagged as spam but get
//! the same outward response, so bots learn nothing.

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use types::ContactMessage;
