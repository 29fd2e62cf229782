//! RFC 2047 header decoding.
//!
//! A raw header value is split into encoded-word segments and plain runs,
//! each decoded on its own, then rejoined with single spaces. A bad charset
//! or transfer encoding degrades only its segment, never the whole header.

use crate::models::record::{HeaderMap, HeaderValue};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use encoding_rs::Encoding;
use mailparse::MailHeader;
use once_cell::sync::Lazy;
use regex::Regex;

static ENCODED_WORD_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"=\?([^?]+)\?([bBqQ])\?([^?]*)\?=").unwrap());

/// Decode one raw header occurrence into the configured output encoding.
pub fn decode_value(raw: &str, out: &'static Encoding) -> String {
  let unfolded = unfold(raw);
  let mut segments: Vec<String> = Vec::new();
  let mut cursor = 0;

  for caps in ENCODED_WORD_RE.captures_iter(&unfolded) {
    let whole = caps.get(0).unwrap();
    let plain = unfolded[cursor..whole.start()].trim();
    if !plain.is_empty() {
      segments.push(plain.to_string());
    }
    segments.push(decode_encoded_word(&caps[1], &caps[2], &caps[3]));
    cursor = whole.end();
  }
  let tail = unfolded[cursor..].trim();
  if !tail.is_empty() {
    segments.push(tail.to_string());
  }

  recode(&segments.join(" "), out)
}

/// Decode every occurrence of every header into a lowercase-keyed map,
/// collapsing single occurrences to scalars.
pub fn header_map(headers: &[MailHeader<'_>], out: &'static Encoding) -> HeaderMap {
  let mut map = HeaderMap::new();
  for h in headers {
    let key = h.get_key_ref().to_ascii_lowercase();
    let raw = String::from_utf8_lossy(h.get_value_raw());
    let decoded = decode_value(&raw, out);
    match map.remove(&key) {
      None => {
        map.insert(key, HeaderValue::Single(decoded));
      }
      Some(HeaderValue::Single(prev)) => {
        map.insert(key, HeaderValue::Multiple(vec![prev, decoded]));
      }
      Some(HeaderValue::Multiple(mut prev)) => {
        prev.push(decoded);
        map.insert(key, HeaderValue::Multiple(prev));
      }
    }
  }
  map
}

/// Decode a single encoded word. Unknown charsets fall back to a lossy
/// decode of the payload; a broken transfer encoding falls back to the
/// payload text itself.
fn decode_encoded_word(charset: &str, encoding: &str, payload: &str) -> String {
  let bytes = match encoding {
    "b" | "B" => B64.decode(payload).ok(),
    // In Q encoding an underscore stands for a space.
    _ => quoted_printable::decode(
      payload.replace('_', " "),
      quoted_printable::ParseMode::Robust,
    )
    .ok(),
  };
  let Some(bytes) = bytes else {
    return payload.to_string();
  };
  match Encoding::for_label(charset.trim().as_bytes()) {
    Some(enc) => {
      let (text, _, _) = enc.decode(&bytes);
      text.trim().to_string()
    }
    None => String::from_utf8_lossy(&bytes).trim().to_string(),
  }
}

/// Re-encode a decoded string into the output encoding, dropping characters
/// the target cannot represent. UTF-8 output is the identity.
pub fn recode(s: &str, out: &'static Encoding) -> String {
  if out == encoding_rs::UTF_8 {
    return s.to_string();
  }
  let (_, _, had_errors) = out.encode(s);
  if !had_errors {
    return s.to_string();
  }
  s.chars()
    .filter(|c| {
      let mut buf = [0u8; 4];
      let (_, _, err) = out.encode(c.encode_utf8(&mut buf));
      !err
    })
    .collect()
}

/// Collapse folded continuation lines into a single-line value.
fn unfold(raw: &str) -> String {
  static FOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n[\t ]*").unwrap());
  FOLD_RE.replace_all(raw, " ").trim().to_string()
}
