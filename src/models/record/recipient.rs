//! A parsed (display-name, address) pair.

use serde::{Deserialize, Serialize};

/// Derived from unstructured text: either field may be empty or absent, but
/// a non-empty source field always yields an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
  pub name: String,
  pub email: Option<String>,
}
