//! CSV row parser
//!
//! Turns the raw text of an uploaded catalog CSV into candidate product
//! records, reporting every rejected line with its 1-based line number and a
//! reason (rows are never dropped silently).
//!
//! Dialect (shared with the export writer via `lcp_common::csv_format`):
//! semicolon separator, first line is the header row, header matching is
//! case-insensitive and synonym-aware, unrecognized headers are ignored,
//! blank lines are skipped, every value is whitespace-trimmed. A missing
//! `slug` is derived from `name` before the completeness check.

use lcp_common::csv_format::{self, Column};
use lcp_common::slug::slugify;
use serde::Serialize;

use super::types::CandidateProduct;

/// A rejected input row with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the uploaded file (or position in a JSON
    /// batch).
    pub line: usize,
    pub reason: String,
}

/// A candidate row together with the input line it came from, so the
/// executor can report per-row failures against the source file.
#[derive(Debug, Clone)]
pub struct NumberedCandidate {
    pub line: usize,
    pub record: CandidateProduct,
}

/// Result of parsing an uploaded CSV file.
#[derive(Debug, Default)]
pub struct ParsedImport {
    pub candidates: Vec<NumberedCandidate>,
    pub skipped: Vec<SkippedRow>,
}

/// Parse the raw text of an uploaded catalog CSV.
///
/// A file with fewer than two non-blank lines (header plus at least one
/// data row) yields zero candidates; that is not an error.
///
/// Line numbers are physical: each row is parsed from its own line of the
/// file, so reported numbers always match what an editor shows. The csv
/// reader's own position tracking does not count the blank lines it skips,
/// which is why the iteration happens here instead. Quoted values cannot
/// span lines.
pub fn parse_csv(content: &str) -> ParsedImport {
    let mut parsed = ParsedImport::default();
    let mut columns: Option<Vec<Option<Column>>> = None;

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;

        // Blank lines are skipped without comment.
        if raw.trim().is_empty() {
            continue;
        }

        let record = match parse_record(raw) {
            Ok(record) => record,
            Err(err) => {
                parsed.skipped.push(SkippedRow {
                    line,
                    reason: format!("malformed CSV row: {err}"),
                });
                continue;
            },
        };

        // A line of bare separators parses to all-empty fields.
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }

        let Some(ref columns) = columns else {
            columns = Some(record.iter().map(csv_format::resolve_column).collect());
            continue;
        };

        match build_candidate(columns, &record) {
            Ok(candidate) => parsed.candidates.push(NumberedCandidate {
                line,
                record: candidate,
            }),
            Err(reason) => parsed.skipped.push(SkippedRow { line, reason }),
        }
    }

    parsed
}

/// Parse a single physical line as one CSV record.
fn parse_record(line: &str) -> Result<csv::StringRecord, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(csv_format::DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(result) => result,
        None => Ok(csv::StringRecord::new()),
    }
}

/// Map one data row to a candidate record by header position, then apply the
/// completeness check: `code`, `name`, and a resolved `slug` must all be
/// non-empty.
fn build_candidate(
    columns: &[Option<Column>],
    record: &csv::StringRecord,
) -> Result<CandidateProduct, String> {
    let mut candidate = CandidateProduct::default();

    for (index, column) in columns.iter().enumerate() {
        let Some(column) = column else { continue };
        let value = record.get(index).unwrap_or("").trim();

        match column {
            Column::Code => candidate.code = value.to_string(),
            Column::Name => candidate.name = value.to_string(),
            Column::Slug => {
                if !value.is_empty() {
                    candidate.slug = Some(value.to_string());
                }
            },
            Column::Description => candidate.description = non_empty(value),
            Column::Specifications => candidate.specifications = non_empty(value),
            Column::Image => candidate.image = non_empty(value),
            Column::Featured => candidate.featured = csv_format::parse_featured(value),
            Column::CategoryId => candidate.category_id = csv_format::parse_category_id(value),
        }
    }

    if candidate.slug.is_none() && !candidate.name.is_empty() {
        let derived = slugify(&candidate.name);
        if !derived.is_empty() {
            candidate.slug = Some(derived);
        }
    }

    let mut missing = Vec::new();
    if candidate.code.is_empty() {
        missing.push("code");
    }
    if candidate.name.is_empty() {
        missing.push("name");
    }
    if !missing.is_empty() {
        return Err(format!("missing required field(s): {}", missing.join(", ")));
    }
    if candidate.slug.is_none() {
        return Err("slug could not be derived from name".to_string());
    }

    Ok(candidate)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_file_with_featured() {
        let parsed = parse_csv("code;name;featured\nA1;Widget;oui\n");

        assert_eq!(parsed.candidates.len(), 1);
        assert!(parsed.skipped.is_empty());

        let candidate = &parsed.candidates[0].record;
        assert_eq!(candidate.code, "A1");
        assert_eq!(candidate.name, "Widget");
        assert!(candidate.featured);
        assert_eq!(candidate.slug.as_deref(), Some("widget"));
        assert_eq!(parsed.candidates[0].line, 2);
    }

    #[test]
    fn test_full_template_row() {
        let content = "code;name;description;specifications;image;featured;categoryId\n\
                       EL-1001;Traction sheave;Cast iron;5 grooves;img/s.jpg;true;3\n";
        let parsed = parse_csv(content);

        assert_eq!(parsed.candidates.len(), 1);
        let candidate = &parsed.candidates[0].record;
        assert_eq!(candidate.code, "EL-1001");
        assert_eq!(candidate.slug.as_deref(), Some("traction-sheave"));
        assert_eq!(candidate.description.as_deref(), Some("Cast iron"));
        assert_eq!(candidate.specifications.as_deref(), Some("5 grooves"));
        assert_eq!(candidate.image.as_deref(), Some("img/s.jpg"));
        assert!(candidate.featured);
        assert_eq!(candidate.category_id, Some(3));
    }

    #[test]
    fn test_header_synonyms_and_case() {
        let parsed = parse_csv("CODE;Nom;Vedette;categorie\nA1;Palier;1;7\n");

        assert_eq!(parsed.candidates.len(), 1);
        let candidate = &parsed.candidates[0].record;
        assert_eq!(candidate.code, "A1");
        assert_eq!(candidate.name, "Palier");
        assert!(candidate.featured);
        assert_eq!(candidate.category_id, Some(7));
    }

    #[test]
    fn test_unrecognized_headers_are_ignored() {
        let parsed = parse_csv("code;name;price;warehouse\nA1;Widget;99.50;Lyon\n");

        assert_eq!(parsed.candidates.len(), 1);
        let candidate = &parsed.candidates[0].record;
        assert_eq!(candidate.code, "A1");
        assert_eq!(candidate.name, "Widget");
    }

    #[test]
    fn test_explicit_slug_column_wins_over_derivation() {
        let parsed = parse_csv("code;name;slug\nA1;Widget;custom-slug\n");
        assert_eq!(parsed.candidates[0].record.slug.as_deref(), Some("custom-slug"));
    }

    #[test]
    fn test_row_missing_code_is_reported_not_dropped() {
        let parsed = parse_csv("code;name\n;Widget\nA2;Sheave\n");

        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(parsed.candidates[0].record.code, "A2");
        assert_eq!(
            parsed.skipped,
            vec![SkippedRow {
                line: 2,
                reason: "missing required field(s): code".to_string(),
            }]
        );
    }

    #[test]
    fn test_row_missing_code_and_name() {
        let parsed = parse_csv("code;name;featured\n;;true\n");

        assert!(parsed.candidates.is_empty());
        assert_eq!(parsed.skipped[0].reason, "missing required field(s): code, name");
    }

    #[test]
    fn test_name_that_yields_no_slug() {
        let parsed = parse_csv("code;name\nA1;!!!\n");

        assert!(parsed.candidates.is_empty());
        assert_eq!(parsed.skipped[0].reason, "slug could not be derived from name");
    }

    #[test]
    fn test_blank_lines_are_skipped_silently() {
        let parsed = parse_csv("code;name\n\nA1;Widget\n\n\nA2;Sheave\n");

        assert_eq!(parsed.candidates.len(), 2);
        assert!(parsed.skipped.is_empty());
        // Line numbers refer to the original file, blank lines included.
        assert_eq!(parsed.candidates[0].line, 3);
        assert_eq!(parsed.candidates[1].line, 6);
    }

    #[test]
    fn test_line_numbers_survive_a_blank_line_before_a_rejected_row() {
        let parsed = parse_csv("code;name\n\n;No code\nA2;Sheave\n");

        assert_eq!(
            parsed.skipped,
            vec![SkippedRow {
                line: 3,
                reason: "missing required field(s): code".to_string(),
            }]
        );
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(parsed.candidates[0].line, 4);
    }

    #[test]
    fn test_values_are_trimmed() {
        let parsed = parse_csv("code;name\n  A1  ;  Widget  \n");

        let candidate = &parsed.candidates[0].record;
        assert_eq!(candidate.code, "A1");
        assert_eq!(candidate.name, "Widget");
        assert_eq!(candidate.slug.as_deref(), Some("widget"));
    }

    #[test]
    fn test_header_only_file_yields_nothing() {
        let parsed = parse_csv("code;name;featured\n");
        assert!(parsed.candidates.is_empty());
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_empty_file_yields_nothing() {
        let parsed = parse_csv("");
        assert!(parsed.candidates.is_empty());
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn test_empty_category_id_is_unset() {
        let parsed = parse_csv("code;name;categoryId\nA1;Widget;\nA2;Sheave;abc\n");

        assert_eq!(parsed.candidates.len(), 2);
        assert_eq!(parsed.candidates[0].record.category_id, None);
        assert_eq!(parsed.candidates[1].record.category_id, None);
    }
}
