//! CSV export query
//!
//! Writes the whole catalog (or, as an import template, the header row plus
//! one sample row) in the same dialect the import parser reads, so an
//! exported file can be edited and re-imported.

use lcp_common::csv_format::{self, EXPORT_HEADERS};
use sqlx::SqlitePool;

use crate::features::products::types::Product;

/// Errors that can occur when exporting the catalog
#[derive(Debug, thiserror::Error)]
pub enum ExportCsvError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),
}

/// Sample data row written after the header in template mode, showing the
/// expected shape of each column.
const TEMPLATE_SAMPLE_ROW: [&str; 7] = [
    "EL-1001",
    "Traction sheave 400",
    "Cast iron traction sheave",
    "5 grooves",
    "",
    "false",
    "",
];

/// Handler function to export all products as CSV text.
///
/// With `template` set, the header row plus one sample row is written.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, template: bool) -> Result<String, ExportCsvError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(csv_format::DELIMITER)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;

    if template {
        writer.write_record(TEMPLATE_SAMPLE_ROW)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| ExportCsvError::Csv(e.into_error().into()))?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }

    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, code, name, slug, description, specifications, image,
               featured, category_id, created_at, updated_at
        FROM products ORDER BY code, id
        "#,
    )
    .fetch_all(&pool)
    .await?;

    for product in &products {
        let category = product
            .category_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        writer.write_record([
            product.code.as_str(),
            product.name.as_str(),
            product.description.as_deref().unwrap_or(""),
            product.specifications.as_deref().unwrap_or(""),
            product.image.as_deref().unwrap_or(""),
            csv_format::encode_featured(product.featured),
            category.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportCsvError::Csv(e.into_error().into()))?;

    // The writer only ever receives UTF-8 input.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_template_has_header_and_sample_row(pool: SqlitePool) {
        let csv = handle(pool, true).await.unwrap();
        let lines: Vec<&str> = csv.trim_end().lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "code;name;description;specifications;image;featured;categoryId"
        );
        assert_eq!(
            lines[1],
            "EL-1001;Traction sheave 400;Cast iron traction sheave;5 grooves;;false;"
        );
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_template_sample_row_parses_as_a_candidate(pool: SqlitePool) {
        let csv = handle(pool, true).await.unwrap();
        let parsed = crate::features::products::import::parse_csv(&csv);

        assert_eq!(parsed.candidates.len(), 1);
        assert!(parsed.skipped.is_empty());
        assert_eq!(parsed.candidates[0].record.code, "EL-1001");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_export_rows(pool: SqlitePool) {
        sqlx::query(
            "INSERT INTO products (code, name, slug, description, featured) \
             VALUES ('EL-1', 'Traction sheave', 'traction-sheave', 'Cast iron', 1)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let csv = handle(pool, false).await.unwrap();
        let lines: Vec<&str> = csv.trim_end().lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "EL-1;Traction sheave;Cast iron;;;true;");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_export_round_trips_through_parser(pool: SqlitePool) {
        sqlx::query(
            "INSERT INTO products (code, name, slug) VALUES ('EL-1', 'Guide rail', 'guide-rail')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let csv = handle(pool, false).await.unwrap();
        let parsed = crate::features::products::import::parse_csv(&csv);

        assert_eq!(parsed.candidates.len(), 1);
        assert!(parsed.skipped.is_empty());
        assert_eq!(parsed.candidates[0].record.code, "EL-1");
        assert_eq!(parsed.candidates[0].record.slug.as_deref(), Some("guide-rail"));
    }
}
