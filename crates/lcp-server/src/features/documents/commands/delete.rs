//! Delete document command
//!
//! Removes the metadata row first, then the stored file. A missing file is
//! tolerated; a missing row is a 404.

use sqlx::SqlitePool;

use crate::storage::{DocumentStore, StorageError};

/// Errors that can occur when deleting a document
#[derive(Debug, thiserror::Error)]
pub enum DeleteDocumentError {
    #[error("Document not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function to delete a document by slug
#[tracing::instrument(skip(pool, store))]
pub async fn handle(
    pool: SqlitePool,
    store: DocumentStore,
    slug: &str,
) -> Result<(), DeleteDocumentError> {
    let result = sqlx::query("DELETE FROM documents WHERE slug = ?1")
        .bind(slug)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteDocumentError::NotFound);
    }

    store.delete(slug).await?;

    tracing::info!(slug, "Document deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_delete_document(pool: SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path()).unwrap();
        store.save("doc", b"%PDF-1.4").await.unwrap();
        sqlx::query(
            "INSERT INTO documents (slug, title, filename, content_type, size_bytes, checksum) \
             VALUES ('doc', 'T', 'f.pdf', 'application/pdf', 8, 'x')",
        )
        .execute(&pool)
        .await
        .unwrap();

        handle(pool.clone(), store.clone(), "doc").await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert!(store.read("doc").await.is_err());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_delete_missing_document(pool: SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path()).unwrap();

        assert!(matches!(
            handle(pool, store, "nope").await,
            Err(DeleteDocumentError::NotFound)
        ));
    }
}
