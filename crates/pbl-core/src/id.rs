//! Canonical authority identifiers.
//!
//! Every identifier that reaches a rendered record is a Wikidata entity URI.
//! Raw numeric codes are only ever seen at the input boundary.

use crate::{Error, Result};

/// Prefix shared by all canonical identifiers; the numeric code follows it.
pub const ENTITY_URI_PREFIX: &str = "http://www.wikidata.org/entity/Q";

/// Format a raw numeric code as a canonical entity URI.
///
/// An empty code yields an empty string, never a dangling prefix.
pub fn entity_uri(code: &str) -> String {
  if code.is_empty() {
    String::new()
  } else {
    format!("{ENTITY_URI_PREFIX}{code}")
  }
}

/// Bring an authority-table identifier into canonical form.
///
/// Accepts a bare code (`123`), a Q-code (`Q123`) or an already canonical
/// URI. Anything else is rejected.
pub fn normalize_entity_id(raw: &str) -> Result<String> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Ok(String::new());
  }

  let code = raw
    .strip_prefix(ENTITY_URI_PREFIX)
    .or_else(|| raw.strip_prefix('Q'))
    .unwrap_or(raw);

  if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::InvalidCode(raw.to_string()));
  }
  Ok(entity_uri(code))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formats_numeric_codes() {
    for code in ["1", "42", "11837542"] {
      assert_eq!(
        entity_uri(code),
        format!("http://www.wikidata.org/entity/Q{code}")
      );
    }
  }

  #[test]
  fn empty_code_stays_empty() {
    assert_eq!(entity_uri(""), "");
  }

  #[test]
  fn normalizes_all_accepted_forms() {
    let expected = "http://www.wikidata.org/entity/Q123";
    assert_eq!(normalize_entity_id("123").unwrap(), expected);
    assert_eq!(normalize_entity_id("Q123").unwrap(), expected);
    assert_eq!(normalize_entity_id(expected).unwrap(), expected);
    assert_eq!(normalize_entity_id("  Q123 ").unwrap(), expected);
    assert_eq!(normalize_entity_id("").unwrap(), "");
  }

  #[test]
  fn rejects_non_numeric_codes() {
    assert!(matches!(
      normalize_entity_id("Qabc"),
      Err(Error::InvalidCode(_))
    ));
    assert!(normalize_entity_id("Q").is_err());
    assert!(normalize_entity_id("https://viaf.org/viaf/1/").is_err());
  }
}
