//! Database helpers: migrations, pool setup, and path handling.

use crate::error::Result;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::path::Path;

/// Default bound on concurrent store connections; acquirers block once the
/// pool is exhausted.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect a bounded pool and ensure the schema exists.
pub async fn connect(db_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let db_url = ensure_sqlite_path(db_url);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&db_url)
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Run SQLite migrations to create tables if absent.
///
/// The parent foreign keys are informational only: deletion cascades in
/// application code, not through a DB-level constraint.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS emails (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            received_time TEXT NOT NULL,
            subject TEXT NULL,
            from_email TEXT NULL,
            from_name TEXT NULL,
            reply_to_email TEXT NULL,
            reply_to_name TEXT NULL,
            to_email TEXT NULL,
            to_name TEXT NULL,
            cc_email TEXT NULL,
            cc_name TEXT NULL,
            raw_headers TEXT NOT NULL,
            encoding TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS email_parts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email_id INTEGER NOT NULL,
            headers TEXT NOT NULL,
            content_type TEXT NOT NULL,
            content TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS email_attachments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email_id INTEGER NOT NULL,
            filename TEXT NOT NULL,
            content_type TEXT NOT NULL,
            content BLOB NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Ensure SQLite file and parent folder exist for a given sqlx URL.
pub fn ensure_sqlite_path(db_url: &str) -> String {
    if !db_url.starts_with("sqlite:") {
        return db_url.to_string();
    }
    let path_part = db_url.trim_start_matches("sqlite://");
    if path_part == ":memory:" {
        return db_url.to_string();
    }
    let (path_only, query) = match path_part.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path_part, None),
    };
    let path = Path::new(path_only);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
    if !path.exists() {
        let _ = std::fs::File::create(path);
    }
    match query {
        Some(q) => format!("sqlite://{}?{}", path_only, q),
        None => format!("sqlite://{}", path_only),
    }
}
