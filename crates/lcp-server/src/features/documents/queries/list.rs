//! List documents query

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::features::documents::types::Document;

/// Query parameters for listing documents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDocumentsQuery {
    /// Restrict to datasheets of one product.
    pub product_id: Option<i64>,
}

/// Handler function to list document metadata, newest first.
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    query: ListDocumentsQuery,
) -> Result<Vec<Document>, sqlx::Error> {
    match query.product_id {
        Some(product_id) => {
            sqlx::query_as::<_, Document>(
                "SELECT id, slug, title, filename, content_type, size_bytes, checksum, \
                 product_id, created_at FROM documents WHERE product_id = ?1 \
                 ORDER BY created_at DESC, id DESC",
            )
            .bind(product_id)
            .fetch_all(&pool)
            .await
        },
        None => {
            sqlx::query_as::<_, Document>(
                "SELECT id, slug, title, filename, content_type, size_bytes, checksum, \
                 product_id, created_at FROM documents ORDER BY created_at DESC, id DESC",
            )
            .fetch_all(&pool)
            .await
        },
    }
}
