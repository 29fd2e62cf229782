//! Decoded header values, scalar or repeated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Decoded headers keyed by lowercase name.
pub type HeaderMap = BTreeMap<String, HeaderValue>;

/// A header that occurred once collapses to a scalar; repeated headers keep
/// every occurrence in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
  Single(String),
  Multiple(Vec<String>),
}

impl HeaderValue {
  /// Collapse a list of decoded occurrences.
  pub fn from_occurrences(mut values: Vec<String>) -> Self {
    if values.len() == 1 {
      HeaderValue::Single(values.remove(0))
    } else {
      HeaderValue::Multiple(values)
    }
  }

  /// Join all occurrences with a comma, the way an address-list header with
  /// repeats is read.
  pub fn joined(&self) -> String {
    match self {
      HeaderValue::Single(s) => s.clone(),
      HeaderValue::Multiple(v) => v.join(","),
    }
  }
}
