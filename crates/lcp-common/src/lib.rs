//! LCP Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared utilities for the LCP workspace.
//!
//! # Overview
//!
//! This crate provides functionality used by both the server and the CLI:
//!
//! - **Slug Generation**: URL-safe identifiers derived from display names
//! - **CSV Format**: the shared catalog CSV dialect (delimiter, headers, synonyms)
//! - **Logging**: tracing subscriber initialization shared by all binaries
//!
//! # Example
//!
//! ```
//! use lcp_common::slug::slugify;
//!
//! assert_eq!(slugify("Câbles d'acier"), "cables-d-acier");
//! ```

pub mod csv_format;
pub mod logging;
pub mod slug;

pub use slug::slugify;
