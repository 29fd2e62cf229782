//! Database row for the email_attachments table.

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttachmentRow {
    pub id: i64,
    pub email_id: i64,
    pub filename: String,
    pub content_type: String,
    /// Raw bytes at rest; base64 only while a record is in transit.
    pub content: Vec<u8>,
}
