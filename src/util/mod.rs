//! Utility functions: tracing setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging: pretty CLI output by default, or an appended plain
/// log file when an operational log path is configured.
pub fn init_tracing(log_path: Option<&Path>) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let file = log_path.and_then(|p| {
    OpenOptions::new().create(true).append(true).open(p).ok()
  });
  match file {
    Some(file) => fmt()
      .with_env_filter(filter)
      .with_target(false)
      .with_ansi(false)
      .with_writer(Mutex::new(file))
      .init(),
    None => fmt()
      .with_env_filter(filter)
      .with_target(false)
      .pretty()
      .init(),
  }
}
