//! Feature modules implementing the LCP API
//!
//! Each feature is a vertical slice following the CQRS (Command Query
//! Responsibility Segregation) pattern, with its own commands, queries, and
//! routes.
//!
//! # Features
//!
//! - **auth**: admin login/logout and session introspection
//! - **categories**: category CRUD and public browsing
//! - **contact**: public contact form (with honeypot) and admin inbox
//! - **documents**: PDF datasheet upload, listing, and download
//! - **products**: product CRUD, public browsing, and the CSV bulk
//!   import/export pipeline
//! - **quotes**: configurator quote requests and admin listing
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (create, update, delete, import)
//! - `queries/` - Read operations (get, list, export)
//! - `routes.rs` - HTTP route definitions
//! - `types.rs` - Shared types (if needed)
//!
//! Commands and queries are standalone async functions taking the connection
//! pool and a typed request value; write handlers are admin-only via the
//! [`crate::auth::extract::AdminIdentity`] extractor.

pub mod auth;
pub mod categories;
pub mod contact;
pub mod documents;
pub mod products;
pub mod quotes;
pub mod shared;

use axum::Router;

use crate::auth::SessionHandle;
use crate::storage::DocumentStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// SQLite connection pool for database operations
    pub db: sqlx::SqlitePool,

    /// Filesystem store for uploaded PDF documents
    pub documents: DocumentStore,

    /// Session backend for admin bearer tokens
    pub sessions: SessionHandle,

    /// Lifetime of newly issued sessions, in seconds
    pub session_ttl_secs: u64,
}

/// Build the feature router, nested under `/api` by the caller.
pub fn router(state: FeatureState) -> Router {
    Router::new()
        .nest("/auth", auth::routes::auth_routes())
        .nest("/products", products::routes::product_routes())
        .nest("/categories", categories::routes::category_routes())
        .nest("/documents", documents::routes::document_routes())
        .merge(contact::routes::contact_routes())
        .merge(quotes::routes::quote_routes())
        .with_state(state)
}
