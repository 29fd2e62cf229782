//! A textual MIME leaf.

use super::header_value::HeaderMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartBody {
  pub content_type: String,
  pub content: String,
  pub headers: HeaderMap,
}
