//! `lcp import` - bulk import a CSV file
//!
//! The file is checked locally first (readable, semicolon-delimited, header
//! row resolving to at least `code` and `name`) so obvious mistakes fail
//! fast without a server round trip. `--check` stops after that step.

use std::path::Path;

use lcp_common::csv_format::{self, Column};

use crate::api::ApiClient;
use crate::error::{CliError, Result};

/// Run the import command
pub async fn run(
    server_url: String,
    token: Option<String>,
    file: &Path,
    check_only: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(file).map_err(|e| {
        CliError::invalid_input(format!("Cannot read {}: {e}", file.display()))
    })?;

    check_header(&content)?;
    println!("{}: header OK", file.display());

    if check_only {
        return Ok(());
    }

    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "import.csv".to_string());

    let client = ApiClient::new(server_url, token)?;
    let report = client.import_csv(&filename, content).await?;

    println!("{}", report.message);
    for product in &report.products {
        println!("  + {} {} ({})", product.code, product.name, product.slug);
    }
    if !report.skipped.is_empty() {
        println!("{} row(s) skipped:", report.skipped.len());
        for row in &report.skipped {
            println!("  line {}: {}", row.line, row.reason);
        }
    }

    Ok(())
}

/// Validate the header row locally.
fn check_header(content: &str) -> Result<()> {
    let header = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| CliError::invalid_input("File is empty"))?;

    let columns: Vec<Option<Column>> = header
        .split(csv_format::DELIMITER as char)
        .map(csv_format::resolve_column)
        .collect();

    for required in [Column::Code, Column::Name] {
        if !columns.contains(&Some(required)) {
            return Err(CliError::invalid_input(format!(
                "Header row is missing a recognized '{}' column (got: {})",
                match required {
                    Column::Code => "code",
                    _ => "name",
                },
                header.trim()
            )));
        }
    }

    Ok(())
}
