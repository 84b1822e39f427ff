//! Wire types shared with the LCP server

use serde::Deserialize;

/// Result of a bulk import, as returned by the server.
#[derive(Debug, Deserialize)]
pub struct ImportReport {
    pub message: String,

    #[serde(default)]
    pub products: Vec<ImportedProduct>,

    #[serde(default)]
    pub skipped: Vec<SkippedRow>,
}

/// A created product, reduced to the fields the CLI prints.
#[derive(Debug, Deserialize)]
pub struct ImportedProduct {
    pub code: String,
    pub name: String,
    pub slug: String,
}

/// A rejected input row.
#[derive(Debug, Deserialize)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

/// Error body of the bulk-import family (`{"message": ...}`).
#[derive(Debug, Deserialize)]
pub struct ImportErrorBody {
    pub message: String,
}
