//! Ingestion run: read one message, assemble, store, write the artifact.

use crate::error::Result;
use crate::source::ContentSource;
use crate::{assemble, db, store};
use std::path::PathBuf;
use tracing::{error, info};

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
  pub source: ContentSource,
  /// Declared output text encoding, default utf-8.
  pub encoding: String,
  /// Directory receiving the `email.json` artifact.
  pub output_dir: PathBuf,
  pub database_url: String,
  pub max_connections: u32,
}

/// Process exactly one message, start to finish. Decode success is
/// independent of storage success: a failed transaction is logged and the
/// local JSON artifact is still written.
pub async fn run(opts: RunOptions) -> Result<()> {
  info!("starting message ingestion");

  let raw = opts.source.read().await?;
  let record = assemble::assemble(&raw, &opts.encoding)?;

  match db::connect(&opts.database_url, opts.max_connections).await {
    Ok(pool) => match store::insert_record(&pool, &record).await {
      Ok(id) => info!("stored message id={id}"),
      Err(e) => error!("failed to store message: {e}"),
    },
    Err(e) => error!("database unavailable: {e}"),
  }

  let path = opts.output_dir.join("email.json");
  tokio::fs::write(&path, serde_json::to_vec_pretty(&record)?).await?;
  info!("record written to {}", path.display());

  Ok(())
}
