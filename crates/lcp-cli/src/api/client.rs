//! HTTP API client for the LCP server

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::api::endpoints;
use crate::api::types::{ImportErrorBody, ImportReport};
use crate::error::{CliError, Result};

/// Default timeout for API requests in seconds.
/// Can be overridden via LCP_API_TIMEOUT_SECS.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 120;

/// API client for the LCP server
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String, token: Option<String>) -> Result<Self> {
        let timeout_secs = std::env::var("LCP_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn token(&self) -> Result<&str> {
        self.token.as_deref().ok_or(CliError::MissingToken)
    }

    /// Check server health
    pub async fn health_check(&self) -> Result<bool> {
        let url = endpoints::health_url(&self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Upload a CSV file for bulk import, returning the per-row report.
    pub async fn import_csv(&self, filename: &str, content: String) -> Result<ImportReport> {
        let token = self.token()?.to_string();
        let url = endpoints::import_csv_url(&self.base_url);

        let part = Part::text(content)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .map_err(|e| CliError::api(format!("Invalid upload: {e}")))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(response.json().await?),
            StatusCode::BAD_REQUEST => {
                let body: ImportErrorBody = response.json().await?;
                Err(CliError::api(body.message))
            },
            StatusCode::UNAUTHORIZED => Err(CliError::api(
                "Unauthorized: the admin token was rejected",
            )),
            status => Err(CliError::api(format!(
                "Unexpected response from server: {status}"
            ))),
        }
    }

    /// Download the catalog (or the import template) as CSV text.
    pub async fn export_csv(&self, template: bool) -> Result<String> {
        let token = self.token()?.to_string();
        let url = endpoints::export_csv_url(&self.base_url, template);

        let response = self.client.get(&url).bearer_auth(token).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            StatusCode::UNAUTHORIZED => Err(CliError::api(
                "Unauthorized: the admin token was rejected",
            )),
            status => Err(CliError::api(format!(
                "Unexpected response from server: {status}"
            ))),
        }
    }
}
