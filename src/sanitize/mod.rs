//! Retrieval sanitizer.
//!
//! Runs when a stored record is serialized back out for external
//! consumption. Lossy on purpose: control and quote characters are
//! removed, not escaped, so this is not the inverse of any ingestion
//! step. Idempotent on already-sanitized input.

use crate::error::Result;
use crate::models::row::StoredMessage;
use serde_json::{Map, Value};

/// Strip backslash, tab, newline, and double-quote characters from every
/// string leaf.
pub fn strip_specials(value: Value) -> Value {
  map_strings(value, |s| {
    s.chars()
      .filter(|c| !matches!(c, '\\' | '\t' | '\n' | '"'))
      .collect()
  })
}

/// Reverse HTML-entity escaping and strip newlines. Applied to textual
/// part content only.
pub fn decode_entities(value: Value) -> Value {
  map_strings(value, |s| {
    html_escape::decode_html_entities(&s).replace('\n', "")
  })
}

/// Rewrite every mapping key, replacing hyphens with underscores.
pub fn underscore_keys(value: Value) -> Value {
  match value {
    Value::Object(obj) => {
      let mut out = Map::with_capacity(obj.len());
      for (k, v) in obj {
        out.insert(k.replace('-', "_"), underscore_keys(v));
      }
      Value::Object(out)
    }
    Value::Array(items) => Value::Array(items.into_iter().map(underscore_keys).collect()),
    other => other,
  }
}

/// Sanitize one stored message for serialization: decode the JSON header
/// blobs back to structured mappings, strip special characters, run the
/// entity pass over part content, and normalize all keys.
pub fn sanitize_stored(stored: &StoredMessage) -> Result<Value> {
  let mut email = serde_json::to_value(&stored.email)?;
  if let Some(obj) = email.as_object_mut() {
    let headers: Value = stored
      .email
      .raw_headers
      .parse::<Value>()
      .unwrap_or(Value::Null);
    obj.insert("raw_headers".to_string(), headers);
  }
  let email = underscore_keys(strip_specials(email));

  let mut parts = Vec::with_capacity(stored.parts.len());
  for part in &stored.parts {
    let mut v = serde_json::to_value(part)?;
    if let Some(obj) = v.as_object_mut() {
      let headers: Value = part.headers.parse::<Value>().unwrap_or(Value::Null);
      obj.insert("headers".to_string(), strip_specials(headers));
      let content = decode_entities(Value::String(part.content.clone()));
      obj.insert("content".to_string(), content);
    }
    parts.push(underscore_keys(v));
  }

  let attachments = stored
    .attachments
    .iter()
    .map(|a| Ok(underscore_keys(serde_json::to_value(a)?)))
    .collect::<Result<Vec<_>>>()?;

  Ok(serde_json::json!({
    "email": email,
    "parts": parts,
    "attachments": attachments,
  }))
}

fn map_strings(value: Value, f: impl Fn(String) -> String + Copy) -> Value {
  match value {
    Value::String(s) => Value::String(f(s)),
    Value::Array(items) => Value::Array(items.into_iter().map(|v| map_strings(v, f)).collect()),
    Value::Object(obj) => Value::Object(
      obj
        .into_iter()
        .map(|(k, v)| (k, map_strings(v, f)))
        .collect(),
    ),
    other => other,
  }
}
