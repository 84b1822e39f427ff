//! Bulk import executor
//!
//! Persists validated candidate records and reports per-row outcomes.
//!
//! # Semantics
//!
//! - All inserts run row-by-row inside a single transaction.
//! - A row that fails validation (empty required field, bad slug, unknown
//!   category) or collides on `slug` is rejected with a reason; the rest of
//!   the batch continues and commits.
//! - Any other database failure aborts and rolls back the whole batch.
//! - An empty batch is a no-op that never touches storage.

use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::features::products::import::{NumberedCandidate, SkippedRow};
use crate::features::products::types::{CandidateProduct, Product};
use crate::features::shared::error_helpers::is_unique_violation;
use crate::features::shared::validation::validate_slug;

/// Maximum accepted slug length for imported products.
const MAX_SLUG_LENGTH: usize = 100;

/// Command to import a batch of candidate products
#[derive(Debug, Clone, Default)]
pub struct BulkImportCommand {
    pub records: Vec<NumberedCandidate>,
}

impl BulkImportCommand {
    /// Wrap a JSON batch, numbering records by their 1-based array position.
    pub fn from_records(records: Vec<CandidateProduct>) -> Self {
        Self {
            records: records
                .into_iter()
                .enumerate()
                .map(|(index, record)| NumberedCandidate {
                    line: index + 1,
                    record,
                })
                .collect(),
        }
    }
}

/// Outcome of a bulk import
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    /// Human-readable count message (`"<N> products imported successfully"`).
    pub message: String,

    /// The created products, re-read from storage with generated ids.
    pub products: Vec<Product>,

    /// Every rejected row with its line number and reason.
    pub skipped: Vec<SkippedRow>,
}

impl ImportOutcome {
    fn new(products: Vec<Product>, skipped: Vec<SkippedRow>) -> Self {
        Self {
            message: format!("{} products imported successfully", products.len()),
            products,
            skipped,
        }
    }
}

/// Errors that can occur during a bulk import
///
/// Row-level problems are not errors: they are reported in
/// [`ImportOutcome::skipped`].
#[derive(Debug, thiserror::Error)]
pub enum BulkImportError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function for bulk product imports
#[tracing::instrument(skip(pool, command), fields(records = command.records.len()))]
pub async fn handle(
    pool: SqlitePool,
    command: BulkImportCommand,
) -> Result<ImportOutcome, BulkImportError> {
    if command.records.is_empty() {
        return Ok(ImportOutcome::new(Vec::new(), Vec::new()));
    }

    // Referential check data, loaded once per batch.
    let category_ids: HashSet<i64> = sqlx::query_scalar("SELECT id FROM categories")
        .fetch_all(&pool)
        .await?
        .into_iter()
        .collect();

    let mut products = Vec::new();
    let mut skipped = Vec::new();

    let mut tx = pool.begin().await?;

    for NumberedCandidate { line, record } in command.records {
        let candidate = match validate_candidate(record, &category_ids) {
            Ok(candidate) => candidate,
            Err(reason) => {
                skipped.push(SkippedRow { line, reason });
                continue;
            },
        };

        let inserted = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (code, name, slug, description, specifications, image, featured, category_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING id, code, name, slug, description, specifications, image,
                      featured, category_id, created_at, updated_at
            "#,
        )
        .bind(&candidate.code)
        .bind(&candidate.name)
        .bind(&candidate.slug)
        .bind(&candidate.description)
        .bind(&candidate.specifications)
        .bind(&candidate.image)
        .bind(candidate.featured)
        .bind(candidate.category_id)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(product) => products.push(product),
            Err(e) if is_unique_violation(&e) => {
                // Collision with an existing product or an earlier row of
                // this batch; reject the row, keep the batch going.
                skipped.push(SkippedRow {
                    line,
                    reason: format!("slug '{}' already exists", candidate.slug),
                });
            },
            Err(e) => return Err(e.into()),
        }
    }

    tx.commit().await?;

    tracing::info!(
        created = products.len(),
        skipped = skipped.len(),
        "Bulk import completed"
    );

    Ok(ImportOutcome::new(products, skipped))
}

/// A candidate that passed per-row validation.
#[derive(Debug)]
struct ValidCandidate {
    code: String,
    name: String,
    slug: String,
    description: Option<String>,
    specifications: Option<String>,
    image: Option<String>,
    featured: bool,
    category_id: Option<i64>,
}

/// Enforce the per-row constraints: non-empty `code`/`name`/`slug`, slug
/// grammar, and category-reference integrity.
fn validate_candidate(
    record: CandidateProduct,
    category_ids: &HashSet<i64>,
) -> Result<ValidCandidate, String> {
    let code = record.code.trim().to_string();
    let name = record.name.trim().to_string();
    let slug = record.slug.as_deref().unwrap_or("").trim().to_string();

    let mut missing = Vec::new();
    if code.is_empty() {
        missing.push("code");
    }
    if name.is_empty() {
        missing.push("name");
    }
    if slug.is_empty() {
        missing.push("slug");
    }
    if !missing.is_empty() {
        return Err(format!("missing required field(s): {}", missing.join(", ")));
    }

    if let Err(e) = validate_slug(&slug, MAX_SLUG_LENGTH) {
        return Err(format!("invalid slug '{slug}': {e}"));
    }

    if let Some(category_id) = record.category_id {
        if !category_ids.contains(&category_id) {
            return Err(format!("unknown category id {category_id}"));
        }
    }

    Ok(ValidCandidate {
        code,
        name,
        slug,
        description: record.description,
        specifications: record.specifications,
        image: record.image,
        featured: record.featured,
        category_id: record.category_id,
    })
}
