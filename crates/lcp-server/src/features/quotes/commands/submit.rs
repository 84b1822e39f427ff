//! Submit quote request command

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::features::shared::validation::{
    validate_email, validate_text, EmailValidationError, NameValidationError,
};

const MAX_NAME_LENGTH: usize = 256;
const MAX_KIND_LENGTH: usize = 128;

/// Command to submit a quote request
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitQuoteCommand {
    pub product_kind: String,
    /// Configurator selections; must be a non-empty JSON object.
    pub selections: serde_json::Map<String, serde_json::Value>,
    pub contact_name: String,
    pub contact_email: String,
    pub message: Option<String>,
}

/// Response from submitting a quote request
#[derive(Debug, Serialize)]
pub struct SubmitQuoteResponse {
    pub id: i64,
    /// Reference the customer can quote back.
    pub reference: String,
}

/// Errors that can occur when submitting a quote request
#[derive(Debug, thiserror::Error)]
pub enum SubmitQuoteError {
    #[error(transparent)]
    InvalidField(#[from] NameValidationError),

    #[error(transparent)]
    InvalidEmail(#[from] EmailValidationError),

    #[error("At least one configurator selection is required")]
    EmptySelections,

    #[error("Selections could not be serialized: {0}")]
    Selections(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function to submit a quote request
#[tracing::instrument(skip(pool, command), fields(product_kind = %command.product_kind))]
pub async fn handle(
    pool: SqlitePool,
    command: SubmitQuoteCommand,
) -> Result<SubmitQuoteResponse, SubmitQuoteError> {
    validate_text(&command.product_kind, "product_kind", MAX_KIND_LENGTH)?;
    validate_text(&command.contact_name, "contact_name", MAX_NAME_LENGTH)?;
    validate_email(&command.contact_email)?;

    if command.selections.is_empty() {
        return Err(SubmitQuoteError::EmptySelections);
    }

    let reference = Uuid::new_v4().to_string();
    let selections = serde_json::to_string(&command.selections)?;

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO quote_requests (reference, product_kind, selections, contact_name, contact_email, message)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id
        "#,
    )
    .bind(&reference)
    .bind(command.product_kind.trim())
    .bind(&selections)
    .bind(command.contact_name.trim())
    .bind(command.contact_email.trim())
    .bind(&command.message)
    .fetch_one(&pool)
    .await?;

    tracing::info!(quote_id = id, reference = %reference, "Quote request received");

    Ok(SubmitQuoteResponse { id, reference })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command() -> SubmitQuoteCommand {
        let mut selections = serde_json::Map::new();
        selections.insert("capacity".to_string(), json!("630 kg"));
        selections.insert("stops".to_string(), json!(4));

        SubmitQuoteCommand {
            product_kind: "passenger-lift".to_string(),
            selections,
            contact_name: "Jean Dupont".to_string(),
            contact_email: "jean@example.com".to_string(),
            message: None,
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_submit_quote(pool: SqlitePool) {
        let response = handle(pool.clone(), command()).await.unwrap();

        assert!(response.id > 0);
        assert_eq!(response.reference.len(), 36);

        let stored: String = sqlx::query_scalar("SELECT selections FROM quote_requests")
            .fetch_one(&pool)
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed["capacity"], "630 kg");
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_references_are_unique(pool: SqlitePool) {
        let a = handle(pool.clone(), command()).await.unwrap();
        let b = handle(pool, command()).await.unwrap();
        assert_ne!(a.reference, b.reference);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_empty_selections_rejected(pool: SqlitePool) {
        let mut cmd = command();
        cmd.selections = serde_json::Map::new();

        assert!(matches!(
            handle(pool, cmd).await,
            Err(SubmitQuoteError::EmptySelections)
        ));
    }
}
