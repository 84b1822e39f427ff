//! Document storage
//!
//! Uploaded PDF datasheets live on the filesystem, keyed by their document
//! slug; the `documents` table holds the metadata (including a sha256
//! checksum of the stored bytes).

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Magic bytes every PDF starts with.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Errors from the document store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document file not found: {0}")]
    NotFound(String),
}

/// Filesystem-backed store for uploaded documents.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open (and create if needed) the store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}.pdf"))
    }

    /// Store the document bytes, returning their sha256 checksum (hex).
    pub async fn save(&self, slug: &str, bytes: &[u8]) -> Result<String, StorageError> {
        tokio::fs::write(self.path_for(slug), bytes).await?;
        Ok(sha256_hex(bytes))
    }

    /// Read the stored bytes for a document.
    pub async fn read(&self, slug: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(slug);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(slug.to_string()))
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Delete the stored bytes for a document. Missing files are fine: the
    /// metadata row is the source of truth.
    pub async fn delete(&self, slug: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path_for(slug)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Hex-encoded sha256 of the given bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Check the PDF magic header.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}
