//! LCP Server Library
//!
//! HTTP backend for the Lift Components Platform: the public catalog API and
//! the token-authenticated admin back-office of an elevator-components
//! manufacturer's website.
//!
//! # Overview
//!
//! - **Public API**: categories, products, documents, contact form, quote
//!   requests from the configurator wizards
//! - **Admin API**: bearer-token sessions, product/category CRUD, PDF
//!   document uploads, CSV bulk import/export
//! - **Import pipeline**: semicolon-delimited CSV parsing, slug derivation,
//!   per-row validation, transactional row-by-row inserts with per-row
//!   outcome reporting
//!
//! # Architecture
//!
//! The server follows a **CQRS (Command Query Responsibility Segregation)**
//! layout: each feature is a vertical slice with its own commands (write
//! operations), queries (read operations), and routes. Commands and queries
//! are plain async handler functions taking the connection pool and a typed
//! request value; routes wire them to Axum and translate their typed errors
//! into HTTP responses.
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework
//! - **SQLx**: SQLite access, embedded migrations
//! - **Tower / tower-http**: CORS, tracing, compression layers

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod features;
pub mod middleware;
pub mod storage;

// Re-export commonly used types
pub use api::response::{ApiResult, AppError};
