//! Upload document command
//!
//! Validates the uploaded bytes (PDF magic header, declared content type),
//! writes them to the document store, then inserts the metadata row. If the
//! insert fails the stored file is removed again so the table stays the
//! source of truth.

use sqlx::SqlitePool;

use crate::features::documents::types::Document;
use crate::features::shared::error_helpers::is_unique_violation;
use crate::features::shared::validation::{validate_slug, SlugValidationError};
use crate::storage::{self, DocumentStore, StorageError};

const MAX_SLUG_LENGTH: usize = 100;

/// Command to upload a PDF datasheet
#[derive(Debug)]
pub struct UploadDocumentCommand {
    pub slug: String,
    pub title: String,
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub product_id: Option<i64>,
}

/// Errors that can occur when uploading a document
#[derive(Debug, thiserror::Error)]
pub enum UploadDocumentError {
    #[error(transparent)]
    InvalidSlug(#[from] SlugValidationError),

    #[error("Title is required")]
    TitleRequired,

    #[error("Only PDF documents are accepted")]
    NotPdf,

    #[error("A document with slug '{0}' already exists")]
    DuplicateSlug(String),

    #[error("Product {0} does not exist")]
    UnknownProduct(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UploadDocumentCommand {
    fn validate(&self) -> Result<(), UploadDocumentError> {
        validate_slug(&self.slug, MAX_SLUG_LENGTH)?;

        if self.title.trim().is_empty() {
            return Err(UploadDocumentError::TitleRequired);
        }

        if self.content_type != "application/pdf" || !storage::is_pdf(&self.bytes) {
            return Err(UploadDocumentError::NotPdf);
        }

        Ok(())
    }
}

/// Handler function to upload a document
#[tracing::instrument(skip(pool, store, command), fields(slug = %command.slug, size = command.bytes.len()))]
pub async fn handle(
    pool: SqlitePool,
    store: DocumentStore,
    command: UploadDocumentCommand,
) -> Result<Document, UploadDocumentError> {
    command.validate()?;

    if let Some(product_id) = command.product_id {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE id = ?1")
            .bind(product_id)
            .fetch_optional(&pool)
            .await?;
        if exists.is_none() {
            return Err(UploadDocumentError::UnknownProduct(product_id));
        }
    }

    // Reject duplicate slugs before touching the filesystem, so a collision
    // cannot clobber another document's stored bytes.
    let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM documents WHERE slug = ?1")
        .bind(&command.slug)
        .fetch_optional(&pool)
        .await?;
    if taken.is_some() {
        return Err(UploadDocumentError::DuplicateSlug(command.slug));
    }

    let checksum = store.save(&command.slug, &command.bytes).await?;

    let inserted = sqlx::query_as::<_, Document>(
        r#"
        INSERT INTO documents (slug, title, filename, content_type, size_bytes, checksum, product_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        RETURNING id, slug, title, filename, content_type, size_bytes, checksum, product_id, created_at
        "#,
    )
    .bind(&command.slug)
    .bind(command.title.trim())
    .bind(&command.filename)
    .bind(&command.content_type)
    .bind(command.bytes.len() as i64)
    .bind(&checksum)
    .bind(command.product_id)
    .fetch_one(&pool)
    .await;

    let document = match inserted {
        Ok(document) => document,
        Err(e) => {
            // Remove the orphaned file; the metadata row never landed.
            if let Err(cleanup) = store.delete(&command.slug).await {
                tracing::warn!("Failed to clean up stored file after insert error: {cleanup}");
            }
            if is_unique_violation(&e) {
                return Err(UploadDocumentError::DuplicateSlug(command.slug));
            }
            return Err(e.into());
        },
    };

    tracing::info!(document_id = document.id, slug = %document.slug, "Document uploaded");

    Ok(document)
}
