use clap::Parser;
use mailsink::app::{self, RunOptions};
use mailsink::source::ContentSource;
use mailsink::{db, util};
use std::path::PathBuf;
use tracing::error;

/// Ingest one raw RFC 5322/MIME message into the relational store.
#[derive(Debug, Parser)]
#[command(name = "mailsink", version, about)]
struct Cli {
  /// Read content from FILE
  #[arg(short, long, value_name = "FILE")]
  file: Option<PathBuf>,

  /// Download content from URL
  #[arg(short, long)]
  url: Option<String>,

  /// Output folder for the JSON artifact
  #[arg(short, long, default_value = "/tmp")]
  output: PathBuf,

  /// Output text encoding
  #[arg(short, long, default_value = "utf-8")]
  encoding: String,

  /// Database URL (defaults to $MAILSINK_DATABASE)
  #[arg(short, long)]
  database: Option<String>,

  /// Operational log file (defaults to stderr)
  #[arg(short, long, value_name = "PATH")]
  log: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  util::init_tracing(cli.log.as_deref());

  let database_url = cli
    .database
    .or_else(|| std::env::var("MAILSINK_DATABASE").ok())
    .unwrap_or_else(|| "sqlite://mailsink.db".to_string());

  let opts = RunOptions {
    source: ContentSource::from_options(cli.file, cli.url),
    encoding: cli.encoding,
    output_dir: cli.output,
    database_url,
    max_connections: db::DEFAULT_MAX_CONNECTIONS,
  };

  if let Err(e) = app::run(opts).await {
    error!("ingestion failed: {e}");
    std::process::exit(1);
  }
}
