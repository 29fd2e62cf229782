//! A binary MIME leaf carrying a Content-Disposition.

use serde::{Deserialize, Serialize};

/// Payload is base64 while the record is in transit; the storage layer
/// decodes it back to raw bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentBody {
  pub filename: String,
  pub content_type: String,
  pub content: String,
}
