//! Database row for the emails table.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// One message row. Name/email columns hold the first recipient of each
/// source sequence, or NULL when the sequence was empty.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EmailRow {
    pub id: i64,
    pub received_time: NaiveDateTime,
    pub subject: Option<String>,
    pub from_email: Option<String>,
    pub from_name: Option<String>,
    pub reply_to_email: Option<String>,
    pub reply_to_name: Option<String>,
    pub to_email: Option<String>,
    pub to_name: Option<String>,
    pub cc_email: Option<String>,
    pub cc_name: Option<String>,
    /// JSON-encoded decoded header mapping.
    pub raw_headers: String,
    pub encoding: String,
}
