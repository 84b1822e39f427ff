//! `lcp export` - download the catalog as CSV

use std::path::Path;

use crate::api::ApiClient;
use crate::error::Result;

/// Run the export command
pub async fn run(
    server_url: String,
    token: Option<String>,
    output: Option<&Path>,
) -> Result<()> {
    let client = ApiClient::new(server_url, token)?;
    let csv = client.export_csv(false).await?;

    write_output(&csv, output)?;
    Ok(())
}

/// Write CSV text to a file or stdout.
pub(crate) fn write_output(csv: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, csv)?;
            let rows = csv.lines().count().saturating_sub(1);
            println!("Wrote {} data row(s) to {}", rows, path.display());
        },
        None => print!("{csv}"),
    }
    Ok(())
}
