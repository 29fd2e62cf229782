//! Free-form address-list parsing.
//!
//! Real-world From/To headers mix four conventions: a bare address, a
//! display name with a bracketed address, an unbracketed trailing address
//! token, and plain text with no address at all. Each field is classified
//! by an ordered set of tagged matchers so the precedence stays explicit
//! and each rule is testable on its own.

use crate::models::record::{HeaderValue, Recipient};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"(?i)^[-!#$%&'*+/=?^_`{}|~0-9A-Z]+(\.[-!#$%&'*+/=?^_`{}|~0-9A-Z]+)*@(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}|[A-Z0-9-]{2,})\.?$",
  )
  .unwrap()
});

static BRACKET_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?i)<([0-9a-z._+=-]+@(?:[0-9a-z-]+\.)+[0-9a-z]{2,9})>").unwrap());

/// How a single address-list field resolved, in fallback order.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressMatch {
  /// The whole field is a syntactically valid address.
  Bare(String),
  /// An address in angle brackets, with the rest as display name.
  Bracketed { name: String, email: String },
  /// An unbracketed address token, with the preceding tokens as name.
  TrailingToken { name: String, email: String },
  /// No resolvable address; the raw field is the name.
  Unresolved(String),
}

/// Classify one comma-separated field.
pub fn classify_field(field: &str) -> AddressMatch {
  let field = field.trim();
  if EMAIL_RE.is_match(field) {
    return AddressMatch::Bare(field.to_string());
  }
  if let Some(caps) = BRACKET_RE.captures(field) {
    let whole = caps.get(0).unwrap();
    let mut name = String::with_capacity(field.len());
    name.push_str(&field[..whole.start()]);
    name.push_str(&field[whole.end()..]);
    return AddressMatch::Bracketed {
      name: name.trim().to_string(),
      email: caps[1].to_string(),
    };
  }
  let tokens: Vec<&str> = field.split_whitespace().collect();
  for (i, token) in tokens.iter().enumerate() {
    let candidate = token.trim_matches(['<', '>']);
    if EMAIL_RE.is_match(candidate) {
      return AddressMatch::TrailingToken {
        name: tokens[..i].join(" "),
        email: candidate.to_string(),
      };
    }
  }
  AddressMatch::Unresolved(field.to_string())
}

/// Parse a raw address-list header value into ordered recipients.
pub fn parse_address_list(raw: &str) -> Vec<Recipient> {
  let normalized = raw.replace(['\r', '\n'], " ");
  split_fields(&normalized)
    .iter()
    .map(|f| f.trim())
    .filter(|f| !f.is_empty())
    .map(|field| match classify_field(field) {
      AddressMatch::Bare(email) => Recipient {
        name: String::new(),
        email: Some(email),
      },
      AddressMatch::Bracketed { name, email }
      | AddressMatch::TrailingToken { name, email } => Recipient {
        name,
        email: Some(email),
      },
      AddressMatch::Unresolved(name) => Recipient { name, email: None },
    })
    .collect()
}

/// Parse a decoded header that may have occurred multiple times; repeats
/// are joined with commas before field splitting.
pub fn parse_header(value: Option<&HeaderValue>) -> Vec<Recipient> {
  match value {
    Some(v) => parse_address_list(&v.joined()),
    None => Vec::new(),
  }
}

/// Split on commas with quoted-field semantics: commas inside double quotes
/// belong to a display name, and the quotes themselves are dropped.
fn split_fields(value: &str) -> Vec<String> {
  let mut fields = Vec::new();
  let mut current = String::new();
  let mut in_quotes = false;
  for c in value.chars() {
    match c {
      '"' => in_quotes = !in_quotes,
      ',' if !in_quotes => {
        fields.push(std::mem::take(&mut current));
      }
      _ => current.push(c),
    }
  }
  fields.push(current);
  fields
}
