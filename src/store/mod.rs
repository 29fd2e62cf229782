//! Storage normalizer: maps one assembled record onto the three-table
//! schema inside a single transaction, plus the retrieval and delete
//! helpers the API collaborator builds on.

use crate::error::Result;
use crate::models::record::{MailRecord, Recipient};
use crate::models::row::{AttachmentRow, EmailRow, PartRow, StoredMessage};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use sqlx::SqlitePool;
use tracing::debug;

/// Sort direction for retrieval by received time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDir {
  Asc,
  Desc,
}

impl SortDir {
  fn as_sql(self) -> &'static str {
    match self {
      SortDir::Asc => "ASC",
      SortDir::Desc => "DESC",
    }
  }
}

/// First recipient of a sequence wins at the storage boundary; an empty
/// sequence leaves both columns NULL.
fn first_recipient(seq: &[Recipient]) -> (Option<&str>, Option<&str>) {
  match seq.first() {
    Some(r) => (r.email.as_deref(), Some(r.name.as_str())),
    None => (None, None),
  }
}

/// Write one record as a single transaction: the emails row, then batched
/// part and attachment rows under the assigned id. Any failure rolls the
/// whole transaction back; partial writes are never visible. Returns the
/// assigned message id.
pub async fn insert_record(pool: &SqlitePool, record: &MailRecord) -> Result<i64> {
  let mut tx = pool.begin().await?;

  let (from_email, from_name) = first_recipient(&record.from);
  let (reply_to_email, reply_to_name) = first_recipient(&record.reply_to);
  let (to_email, to_name) = first_recipient(&record.to);
  let (cc_email, cc_name) = first_recipient(&record.cc);
  let raw_headers = serde_json::to_string(&record.headers)?;

  let res = sqlx::query(
    "INSERT INTO emails (received_time, subject, from_email, from_name, \
     reply_to_email, reply_to_name, to_email, to_name, cc_email, cc_name, \
     raw_headers, encoding) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
  )
  .bind(record.received)
  .bind(&record.subject)
  .bind(from_email)
  .bind(from_name)
  .bind(reply_to_email)
  .bind(reply_to_name)
  .bind(to_email)
  .bind(to_name)
  .bind(cc_email)
  .bind(cc_name)
  .bind(&raw_headers)
  .bind(&record.encoding)
  .execute(&mut *tx)
  .await?;
  let email_id = res.last_insert_rowid();

  for part in &record.parts {
    sqlx::query(
      "INSERT INTO email_parts (email_id, headers, content_type, content) VALUES (?, ?, ?, ?)",
    )
    .bind(email_id)
    .bind(serde_json::to_string(&part.headers)?)
    .bind(&part.content_type)
    .bind(&part.content)
    .execute(&mut *tx)
    .await?;
  }

  for att in &record.attachments {
    // Transit payload is base64; rows hold raw bytes.
    let bytes = B64.decode(&att.content)?;
    sqlx::query(
      "INSERT INTO email_attachments (email_id, filename, content_type, content) \
       VALUES (?, ?, ?, ?)",
    )
    .bind(email_id)
    .bind(&att.filename)
    .bind(&att.content_type)
    .bind(bytes)
    .execute(&mut *tx)
    .await?;
  }

  tx.commit().await?;
  debug!("stored message {email_id} with {} parts, {} attachments",
    record.parts.len(), record.attachments.len());
  Ok(email_id)
}

/// Fetch stored messages for an exact recipient email, with their child
/// rows, ordered by received time.
pub async fn fetch_stored(
  pool: &SqlitePool,
  to_email: &str,
  dir: SortDir,
  limit: Option<i64>,
  offset: i64,
) -> Result<Vec<StoredMessage>> {
  // SQLite treats LIMIT -1 as unbounded.
  let sql = format!(
    "SELECT * FROM emails WHERE to_email = ? ORDER BY received_time {} LIMIT ? OFFSET ?",
    dir.as_sql()
  );
  let emails: Vec<EmailRow> = sqlx::query_as(&sql)
    .bind(to_email)
    .bind(limit.unwrap_or(-1))
    .bind(offset)
    .fetch_all(pool)
    .await?;

  let mut out = Vec::with_capacity(emails.len());
  for email in emails {
    let parts: Vec<PartRow> =
      sqlx::query_as("SELECT * FROM email_parts WHERE email_id = ? ORDER BY id")
        .bind(email.id)
        .fetch_all(pool)
        .await?;
    let attachments: Vec<AttachmentRow> =
      sqlx::query_as("SELECT * FROM email_attachments WHERE email_id = ? ORDER BY id")
        .bind(email.id)
        .fetch_all(pool)
        .await?;
    out.push(StoredMessage {
      email,
      parts,
      attachments,
    });
  }
  Ok(out)
}

/// Count stored messages for an exact recipient email.
pub async fn count_stored(pool: &SqlitePool, to_email: &str) -> Result<i64> {
  let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM emails WHERE to_email = ?")
    .bind(to_email)
    .fetch_one(pool)
    .await?;
  Ok(count)
}

/// Delete one message and its children. The cascade is explicit in
/// application code. Returns false when no message row matched.
pub async fn delete_message(pool: &SqlitePool, id: i64) -> Result<bool> {
  let mut tx = pool.begin().await?;
  sqlx::query("DELETE FROM email_parts WHERE email_id = ?")
    .bind(id)
    .execute(&mut *tx)
    .await?;
  sqlx::query("DELETE FROM email_attachments WHERE email_id = ?")
    .bind(id)
    .execute(&mut *tx)
    .await?;
  let res = sqlx::query("DELETE FROM emails WHERE id = ?")
    .bind(id)
    .execute(&mut *tx)
    .await?;
  tx.commit().await?;
  Ok(res.rows_affected() > 0)
}

/// Delete every message, part, and attachment. Returns the number of
/// message rows removed.
pub async fn delete_all(pool: &SqlitePool) -> Result<u64> {
  let mut tx = pool.begin().await?;
  sqlx::query("DELETE FROM email_parts")
    .execute(&mut *tx)
    .await?;
  sqlx::query("DELETE FROM email_attachments")
    .execute(&mut *tx)
    .await?;
  let res = sqlx::query("DELETE FROM emails").execute(&mut *tx).await?;
  tx.commit().await?;
  Ok(res.rows_affected())
}
