use thiserror::Error;

/// Fatal errors for an ingestion run. Per-field decode problems never show
/// up here; they degrade inside the record instead.
#[derive(Error, Debug)]
pub enum SinkError {
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("fetch error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("message parse error: {0}")]
  Parse(#[from] mailparse::MailParseError),

  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("attachment transit decode error: {0}")]
  Transit(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, SinkError>;
