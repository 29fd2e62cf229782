//! A stored message with its child rows, as handed to the API boundary.

use super::{AttachmentRow, EmailRow, PartRow};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StoredMessage {
    pub email: EmailRow,
    pub parts: Vec<PartRow>,
    pub attachments: Vec<AttachmentRow>,
}
