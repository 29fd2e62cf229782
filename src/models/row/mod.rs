//! Database rows for the three-table schema.

pub mod attachment_row;
pub mod email_row;
pub mod part_row;
pub mod stored_message;

pub use attachment_row::AttachmentRow;
pub use email_row::EmailRow;
pub use part_row::PartRow;
pub use stored_message::StoredMessage;
