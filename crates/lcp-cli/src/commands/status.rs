//! `lcp status` - check server health

use crate::api::ApiClient;
use crate::error::{CliError, Result};

/// Run the status command
pub async fn run(server_url: String) -> Result<()> {
    let client = ApiClient::new(server_url.clone(), None)?;

    if client.health_check().await? {
        println!("Server at {server_url} is healthy");
        Ok(())
    } else {
        Err(CliError::api(format!("Server at {server_url} is not reachable or unhealthy")))
    }
}
