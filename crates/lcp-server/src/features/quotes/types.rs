//! Quote request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored quote request from the public configurator.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuoteRequest {
    pub id: i64,
    /// Unique reference handed to the customer (e.g. printed in the
    /// confirmation mail).
    pub reference: String,
    pub product_kind: String,
    /// The configurator selections, as a JSON object.
    pub selections: sqlx::types::Json<serde_json::Map<String, serde_json::Value>>,
    pub contact_name: String,
    pub contact_email: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
