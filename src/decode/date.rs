//! Date header normalization.

use chrono::{Local, NaiveDateTime, TimeZone};
use mailparse::dateparse;

/// Parse an RFC 5322 date into local wall-clock time. Absent or unparsable
/// values fall back to the current ingestion time, so every message carries
/// a usable timestamp; callers must not treat a fallback as authoritative.
pub fn normalize_date(raw: Option<&str>) -> NaiveDateTime {
  let now = || Local::now().naive_local();
  let Some(raw) = raw else {
    return now();
  };
  match dateparse(raw) {
    Ok(ts) => Local
      .timestamp_opt(ts, 0)
      .single()
      .map(|dt| dt.naive_local())
      .unwrap_or_else(now),
    Err(_) => now(),
  }
}
