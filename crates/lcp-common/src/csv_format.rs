//! Catalog CSV dialect
//!
//! The admin back-office exchanges the catalog as semicolon-delimited,
//! UTF-8 CSV. This module is the single definition of that dialect: the
//! delimiter, the canonical header row, header synonyms accepted on import,
//! and the encoding of the `featured` and `categoryId` columns.
//!
//! The server's import parser and export writer, and the CLI, all build on
//! these helpers so the two sides cannot drift apart.

/// Field separator for the catalog CSV dialect.
pub const DELIMITER: u8 = b';';

/// Canonical header row, in export order.
///
/// `slug` is intentionally absent: it is derived from `name` on import.
pub const EXPORT_HEADERS: [&str; 7] = [
    "code",
    "name",
    "description",
    "specifications",
    "image",
    "featured",
    "categoryId",
];

/// A recognized column of the catalog CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Code,
    Name,
    Slug,
    Description,
    Specifications,
    Image,
    Featured,
    CategoryId,
}

/// Resolve a header cell to a known column.
///
/// Matching is case-insensitive and synonym-aware; the French aliases come
/// from spreadsheets the sales team maintains. Unrecognized headers return
/// `None` and are ignored by the parser, which keeps old templates working
/// when new columns are added.
pub fn resolve_column(header: &str) -> Option<Column> {
    match header.trim().to_lowercase().as_str() {
        "code" => Some(Column::Code),
        "name" | "nom" => Some(Column::Name),
        "slug" => Some(Column::Slug),
        "description" => Some(Column::Description),
        "specifications" => Some(Column::Specifications),
        "image" => Some(Column::Image),
        "featured" | "vedette" => Some(Column::Featured),
        "categoryid" | "category_id" | "categorie" => Some(Column::CategoryId),
        _ => None,
    }
}

/// Decode the `featured` column.
///
/// Truthy values are `true`, `1`, and `oui` (case-insensitive, after
/// trimming); everything else, including an empty cell, is false.
pub fn parse_featured(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "oui")
}

/// Encode the `featured` column for export.
pub fn encode_featured(featured: bool) -> &'static str {
    if featured {
        "true"
    } else {
        "false"
    }
}

/// Decode the `categoryId` column.
///
/// Set only when the trimmed cell is a non-empty integer; anything else
/// (empty, text, fractions) leaves the reference unset.
pub fn parse_category_id(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse().ok()
}
