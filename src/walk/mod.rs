//! MIME tree traversal.
//!
//! Walks depth-first over leaf parts only; multipart containers carry no
//! content of their own. A leaf with a Content-Disposition becomes an
//! attachment (payload base64 in transit); any other leaf becomes a
//! textual part, decoded with its declared charset. A leaf whose declared
//! charset is unknown is skipped entirely rather than failing the walk.

use crate::decode::header;
use crate::models::record::{AttachmentBody, PartBody};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use encoding_rs::Encoding;
use mailparse::{MailHeaderMap, ParsedMail};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static FILENAME_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r#"(?is)filename="(.+?)"|filename=([^;\n\r"']+)"#).unwrap());

#[derive(Debug, Default)]
pub struct WalkOutput {
  pub parts: Vec<PartBody>,
  pub attachments: Vec<AttachmentBody>,
}

/// Walk a parsed message, classifying each leaf. `message_charset` is the
/// top-level declared charset used when a textual leaf declares none.
pub fn walk(msg: &ParsedMail<'_>, message_charset: &str, out: &'static Encoding) -> WalkOutput {
  let mut output = WalkOutput::default();
  visit(msg, message_charset, out, &mut output);
  output
}

fn visit(
  part: &ParsedMail<'_>,
  message_charset: &str,
  out: &'static Encoding,
  output: &mut WalkOutput,
) {
  if !part.subparts.is_empty() {
    for sub in &part.subparts {
      visit(sub, message_charset, out, output);
    }
    return;
  }

  let disposition = part.headers.get_first_value("content-disposition");
  if let Some(disposition) = disposition {
    let payload = part.get_body_raw().unwrap_or_default();
    output.attachments.push(AttachmentBody {
      filename: extract_filename(&disposition),
      content_type: part.ctype.mimetype.clone(),
      content: B64.encode(payload),
    });
    return;
  }

  let label = part
    .ctype
    .params
    .get("charset")
    .map(String::as_str)
    .unwrap_or(message_charset);
  let Some(enc) = Encoding::for_label(label.trim().as_bytes()) else {
    debug!("skipping leaf with unsupported charset {label:?}");
    return;
  };
  let raw = part.get_body_raw().unwrap_or_default();
  let (text, _, _) = enc.decode(&raw);
  output.parts.push(PartBody {
    content_type: part.ctype.mimetype.clone(),
    // Undecodable bytes are dropped rather than failing the part.
    content: text.replace('\u{FFFD}', ""),
    headers: header::header_map(&part.headers, out),
  });
}

/// Pull a filename out of a Content-Disposition value, matching quoted then
/// unquoted forms, with `"undefined"` when neither is present.
pub fn extract_filename(disposition: &str) -> String {
  FILENAME_RE
    .captures(disposition)
    .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
    .map(|m| m.as_str().trim().to_string())
    .filter(|s| !s.is_empty())
    .unwrap_or_else(|| "undefined".to_string())
}
