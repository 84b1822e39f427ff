//! `lcp template` - download an import template (header plus sample row)

use std::path::Path;

use crate::api::ApiClient;
use crate::commands::export::write_output;
use crate::error::Result;

/// Run the template command
pub async fn run(
    server_url: String,
    token: Option<String>,
    output: Option<&Path>,
) -> Result<()> {
    let client = ApiClient::new(server_url, token)?;
    let csv = client.export_csv(true).await?;

    write_output(&csv, output)?;
    Ok(())
}
