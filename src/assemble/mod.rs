//! Normalized record assembly.
//!
//! Drives the decoders in a fixed order: headers once, then subject,
//! recipients, received time, then the MIME walk. Never touches storage.

use crate::address;
use crate::decode::{date, header, subject};
use crate::error::Result;
use crate::models::record::MailRecord;
use crate::walk;
use encoding_rs::Encoding;
use mailparse::{parse_mail, MailHeaderMap};

/// Assemble one immutable record from raw message bytes. `out_encoding` is
/// the declared output text encoding; unknown labels fall back to UTF-8.
pub fn assemble(raw: &[u8], out_encoding: &str) -> Result<MailRecord> {
  let parsed = parse_mail(raw)?;
  let out = Encoding::for_label(out_encoding.as_bytes()).unwrap_or(encoding_rs::UTF_8);

  let headers = header::header_map(&parsed.headers, out);

  // The subject is repaired from its raw folded form before decoding, so
  // encoded words split across a fold survive.
  let subject = parsed
    .headers
    .get_first_header("Subject")
    .map(|h| String::from_utf8_lossy(h.get_value_raw()).into_owned())
    .map(|s| header::decode_value(&subject::unfold_subject(&s), out))
    .unwrap_or_default();

  let received = date::normalize_date(parsed.headers.get_first_value("Date").as_deref());

  let to = address::parse_header(headers.get("to"));
  let reply_to = address::parse_header(headers.get("reply-to"));
  let from = address::parse_header(headers.get("from"));
  let cc = address::parse_header(headers.get("cc"));

  let message_charset = parsed
    .ctype
    .params
    .get("charset")
    .cloned()
    .unwrap_or_else(|| "utf-8".to_string());
  let walked = walk::walk(&parsed, &message_charset, out);

  Ok(MailRecord {
    headers,
    received,
    subject,
    to,
    reply_to,
    from,
    cc,
    attachments: walked.attachments,
    parts: walked.parts,
    encoding: out_encoding.to_string(),
  })
}
