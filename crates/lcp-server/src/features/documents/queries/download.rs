//! Download document query
//!
//! Resolves the metadata row, then streams the stored bytes. A row whose
//! file has gone missing is reported as an internal inconsistency, not a
//! 404: the table is the source of truth.

use sqlx::SqlitePool;

use crate::features::documents::types::Document;
use crate::storage::{DocumentStore, StorageError};

/// A document ready to serve: metadata plus the stored bytes.
#[derive(Debug)]
pub struct DocumentDownload {
    pub document: Document,
    pub bytes: Vec<u8>,
}

/// Errors that can occur when downloading a document
#[derive(Debug, thiserror::Error)]
pub enum DownloadDocumentError {
    #[error("Document not found")]
    NotFound,

    #[error("Stored file missing for document '{0}'")]
    FileMissing(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function to fetch a document and its bytes by slug
#[tracing::instrument(skip(pool, store))]
pub async fn handle(
    pool: SqlitePool,
    store: DocumentStore,
    slug: &str,
) -> Result<DocumentDownload, DownloadDocumentError> {
    let document = sqlx::query_as::<_, Document>(
        "SELECT id, slug, title, filename, content_type, size_bytes, checksum, \
         product_id, created_at FROM documents WHERE slug = ?1",
    )
    .bind(slug)
    .fetch_optional(&pool)
    .await?
    .ok_or(DownloadDocumentError::NotFound)?;

    let bytes = match store.read(slug).await {
        Ok(bytes) => bytes,
        Err(StorageError::NotFound(slug)) => {
            return Err(DownloadDocumentError::FileMissing(slug));
        },
        Err(e) => return Err(DownloadDocumentError::Storage(e)),
    };

    Ok(DocumentDownload { document, bytes })
}
