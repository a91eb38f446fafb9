//! Answer canonicalization for comparison purposes.
//!
//! Two directions share the generic pass (Unicode lowercase, edge punctuation
//! strip, whitespace collapse). English answers additionally lose one leading
//! article; Czech answers lose parenthetical annotations such as gender
//! markers, so "pes (m)" and "pes" compare equal.

/// Characters stripped from both ends after lowercasing.
const EDGE_TRIM: &str = " \t\n\r\0\x0B.,;:!?()[]{}\"'";

/// Shared pass: lowercase, strip edge punctuation, collapse whitespace runs.
pub fn normalize_generic(s: &str) -> String {
  let s = s.trim().to_lowercase();
  let s = s.trim_matches(|c: char| EDGE_TRIM.contains(c));
  s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize an English-side term: one leading `the`/`a`/`an` is dropped
/// before the generic pass, so "The dog" and "dog" compare equal.
pub fn normalize_english(s: &str) -> String {
  let lowered = s.trim().to_lowercase();
  normalize_generic(strip_leading_article(&lowered))
}

/// Normalize a Czech-side term: parenthetical annotations are removed
/// anywhere in the string before the generic pass.
pub fn normalize_czech(s: &str) -> String {
  normalize_generic(&strip_parenthetical(s))
}

/// Remove every `( ... )` group, leaving a single space in its place.
/// An unclosed `(` is kept as-is. Whitespace is collapsed afterwards.
pub fn strip_parenthetical(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut rest = s;
  while let Some(open) = rest.find('(') {
    out.push_str(&rest[..open]);
    match rest[open..].find(')') {
      Some(close) => {
        out.push(' ');
        rest = &rest[open + close + 1..];
      }
      None => {
        out.push_str(&rest[open..]);
        rest = "";
      }
    }
  }
  out.push_str(rest);
  out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop at most one leading article followed by whitespace.
/// Input is expected to be lowercased already.
fn strip_leading_article(s: &str) -> &str {
  for article in ["the", "an", "a"] {
    if let Some(rest) = s.strip_prefix(article) {
      if rest.starts_with(char::is_whitespace) {
        return rest.trim_start();
      }
    }
  }
  s
}
