//! Folded-subject repair.
//!
//! Naive unfolding breaks RFC 2047 encoded words whose boundaries fall on a
//! line break. This rejoins the lines into a single encoded-word string the
//! header decoder can handle.

/// Repair a line-folded encoded subject. Values without line breaks, or not
/// starting with an encoded-word marker, pass through untouched. Idempotent.
pub fn unfold_subject(raw: &str) -> String {
  let subject = raw.trim();
  if subject.len() < 2 || !subject.contains('\n') || !subject.starts_with("=?") {
    return subject.to_string();
  }
  let stripped = subject.replace('\r', "");
  let mut out = String::new();
  for line in stripped.split('\n') {
    let line = line.trim_start_matches(['\t', ' ']);
    if line.is_empty() {
      continue;
    }
    out.push_str(line);
    // A trailing '=' is a soft continuation inside encoded-word syntax; the
    // next line needs a separating space to stay decodable.
    if line.ends_with('=') {
      out.push(' ');
    }
  }
  out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_subject_is_unchanged() {
    assert_eq!(unfold_subject("Hello there"), "Hello there");
  }

  #[test]
  fn folded_encoded_subject_rejoins_on_soft_continuation() {
    let folded = "=?UTF-8?B?SGVsbG8=?=\r\n =?UTF-8?B?V29ybGQ=?=";
    assert_eq!(
      unfold_subject(folded),
      "=?UTF-8?B?SGVsbG8=?= =?UTF-8?B?V29ybGQ=?="
    );
  }

  #[test]
  fn unfolding_is_idempotent() {
    let folded = "=?UTF-8?B?SGVsbG8=?=\r\n\t=?UTF-8?B?V29ybGQ=?=";
    let once = unfold_subject(folded);
    assert_eq!(unfold_subject(&once), once);
  }

  #[test]
  fn folded_subject_without_marker_is_unchanged() {
    let folded = "plain\r\n subject";
    assert_eq!(unfold_subject(folded), folded.trim());
  }
}
