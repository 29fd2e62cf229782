//! Content sources for an ingestion run.

use crate::error::Result;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::info;

/// Where the raw message bytes come from, in CLI precedence order:
/// local file, then remote URL, then standard input.
#[derive(Debug, Clone)]
pub enum ContentSource {
  File(PathBuf),
  Url(String),
  Stdin,
}

impl ContentSource {
  pub fn from_options(file: Option<PathBuf>, url: Option<String>) -> Self {
    if let Some(path) = file {
      ContentSource::File(path)
    } else if let Some(url) = url {
      ContentSource::Url(url)
    } else {
      ContentSource::Stdin
    }
  }

  /// Read the raw message. I/O failures here are fatal to the run.
  pub async fn read(&self) -> Result<Vec<u8>> {
    match self {
      ContentSource::File(path) => {
        info!("reading content from file: {}", path.display());
        Ok(tokio::fs::read(path).await?)
      }
      ContentSource::Url(url) => {
        info!("downloading content from url: {}", url);
        let body = reqwest::get(url).await?.error_for_status()?.bytes().await?;
        Ok(body.to_vec())
      }
      ContentSource::Stdin => {
        info!("reading content from stdin");
        let mut buf = Vec::new();
        tokio::io::stdin().read_to_end(&mut buf).await?;
        Ok(buf)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_takes_precedence_over_url() {
    let src = ContentSource::from_options(Some("/tmp/x.eml".into()), Some("http://u".into()));
    assert!(matches!(src, ContentSource::File(_)));
  }

  #[test]
  fn stdin_is_the_default() {
    let src = ContentSource::from_options(None, None);
    assert!(matches!(src, ContentSource::Stdin));
  }
}
