//! Submit contact message command
//!
//! The form carries a hidden `website` field humans never see. A submission
//! that fills it is stored flagged as spam, but the caller gets the same
//! success response either way.

use serde::Deserialize;
use sqlx::SqlitePool;

use crate::features::shared::validation::{
    validate_email, validate_text, EmailValidationError, NameValidationError,
};

const MAX_NAME_LENGTH: usize = 256;
const MAX_MESSAGE_LENGTH: usize = 10_000;

/// Command to submit a contact message
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitContactCommand {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub message: String,

    /// Honeypot field. Hidden in the form; any value marks the submission
    /// as spam.
    #[serde(default)]
    pub website: Option<String>,
}

/// Errors that can occur when submitting a contact message
#[derive(Debug, thiserror::Error)]
pub enum SubmitContactError {
    #[error(transparent)]
    InvalidField(#[from] NameValidationError),

    #[error(transparent)]
    InvalidEmail(#[from] EmailValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handler function to submit a contact message.
///
/// Returns the stored message id.
#[tracing::instrument(skip(pool, command), fields(email = %command.email))]
pub async fn handle(
    pool: SqlitePool,
    command: SubmitContactCommand,
) -> Result<i64, SubmitContactError> {
    validate_text(&command.name, "name", MAX_NAME_LENGTH)?;
    validate_email(&command.email)?;
    validate_text(&command.message, "message", MAX_MESSAGE_LENGTH)?;

    let is_spam = command
        .website
        .as_deref()
        .is_some_and(|value| !value.trim().is_empty());

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO contact_messages (name, email, company, phone, message, is_spam)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        RETURNING id
        "#,
    )
    .bind(command.name.trim())
    .bind(command.email.trim())
    .bind(&command.company)
    .bind(&command.phone)
    .bind(command.message.trim())
    .bind(is_spam)
    .fetch_one(&pool)
    .await?;

    if is_spam {
        tracing::info!(message_id = id, "Contact message flagged as spam by honeypot");
    } else {
        tracing::info!(message_id = id, "Contact message received");
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::contact::types::ContactMessage;

    fn command() -> SubmitContactCommand {
        SubmitContactCommand {
            name: "Jean Dupont".to_string(),
            email: "jean@example.com".to_string(),
            company: None,
            phone: None,
            message: "Looking for a traction sheave.".to_string(),
            website: None,
        }
    }

    async fn stored(pool: &SqlitePool, id: i64) -> ContactMessage {
        sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, email, company, phone, message, is_spam, created_at \
             FROM contact_messages WHERE id = ?1",
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_submit_contact_message(pool: SqlitePool) {
        let id = handle(pool.clone(), command()).await.unwrap();

        let message = stored(&pool, id).await;
        assert_eq!(message.name, "Jean Dupont");
        assert!(!message.is_spam);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_honeypot_flags_spam(pool: SqlitePool) {
        let mut cmd = command();
        cmd.website = Some("https://spam.example".to_string());

        let id = handle(pool.clone(), cmd).await.unwrap();
        assert!(stored(&pool, id).await.is_spam);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_blank_honeypot_is_not_spam(pool: SqlitePool) {
        let mut cmd = command();
        cmd.website = Some("   ".to_string());

        let id = handle(pool.clone(), cmd).await.unwrap();
        assert!(!stored(&pool, id).await.is_spam);
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_invalid_email_rejected(pool: SqlitePool) {
        let mut cmd = command();
        cmd.email = "not-an-email".to_string();

        assert!(matches!(
            handle(pool, cmd).await,
            Err(SubmitContactError::InvalidEmail(_))
        ));
    }
}
