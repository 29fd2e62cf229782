//! In-memory normalized record types produced by the assembler.

pub mod attachment_body;
pub mod header_value;
pub mod mail_record;
pub mod part_body;
pub mod recipient;

pub use attachment_body::AttachmentBody;
pub use header_value::{HeaderMap, HeaderValue};
pub use mail_record::MailRecord;
pub use part_body::PartBody;
pub use recipient::Recipient;
