//! Database row for the email_parts table.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PartRow {
    pub id: i64,
    pub email_id: i64,
    /// JSON-encoded decoded header mapping.
    pub headers: String,
    pub content_type: String,
    pub content: String,
}
