//! Raw journal-item input, one structure per ingestion path.
//!
//! Both structures list every recognised field; anything else is rejected
//! by serde before a record is built. Optional fields may be missing or
//! `null`, and the multi-valued fields that upstream extracts sometimes
//! flatten to a single entry accept either shape.

use std::fmt;

use serde::{
  Deserialize, Deserializer,
  de::{self, Visitor},
};

use crate::{Result, record::Heading};

// ─── Scalars ─────────────────────────────────────────────────────────────────

/// A scalar that upstream extracts emit either as a string or as a number.
///
/// `null`, `false`, `0` and `""` all read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOrNumber(String);

impl TextOrNumber {
  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_string(self) -> String { self.0 }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl From<&str> for TextOrNumber {
  fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl<'de> Deserialize<'de> for TextOrNumber {
  fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
    struct TextOrNumberVisitor;

    impl<'de> Visitor<'de> for TextOrNumberVisitor {
      type Value = TextOrNumber;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, an integer or null")
      }

      fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(TextOrNumber(v.to_string()))
      }

      fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(TextOrNumber(v))
      }

      fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(if v == 0 {
          TextOrNumber::default()
        } else {
          TextOrNumber(v.to_string())
        })
      }

      fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        match u64::try_from(v) {
          Ok(v) => self.visit_u64(v),
          Err(_) => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
        }
      }

      fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        if v {
          Err(E::invalid_type(de::Unexpected::Bool(v), &self))
        } else {
          Ok(TextOrNumber::default())
        }
      }

      fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TextOrNumber::default())
      }

      fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TextOrNumber::default())
      }
    }

    d.deserialize_any(TextOrNumberVisitor)
  }
}

// ─── Shape coercion ──────────────────────────────────────────────────────────

/// Either a proper list or a single bare entry standing in for a
/// one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
  Many(Vec<T>),
  One(T),
}

impl<T> Default for OneOrMany<T> {
  fn default() -> Self { Self::Many(Vec::new()) }
}

impl<T> IntoIterator for OneOrMany<T> {
  type Item = T;
  type IntoIter = std::vec::IntoIter<T>;

  fn into_iter(self) -> Self::IntoIter {
    match self {
      Self::Many(values) => values.into_iter(),
      Self::One(value) => vec![value].into_iter(),
    }
  }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
  fn from(value: OneOrMany<T>) -> Self { value.into_iter().collect() }
}

// ─── Entries ─────────────────────────────────────────────────────────────────

/// `[code, name]` — an author or subject person.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersonRef(pub TextOrNumber, pub String);

/// `[code, name]` or `[code, name, [role, ...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CoCreatorRef {
  WithRoles(TextOrNumber, String, Option<Vec<String>>),
  Plain(TextOrNumber, String),
}

impl CoCreatorRef {
  pub fn into_parts(self) -> (TextOrNumber, String, Vec<String>) {
    match self {
      Self::WithRoles(code, name, roles) => {
        (code, name, roles.unwrap_or_default())
      }
      Self::Plain(code, name) => (code, name, Vec::new()),
    }
  }
}

/// `"heading-id"` or `["heading-id", "person-id"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HeadingRef {
  Bare(String),
  Attributed(String, String),
}

impl HeadingRef {
  pub fn into_heading(self) -> Heading {
    match self {
      Self::Bare(id) => Heading::Bare(id),
      Self::Attributed(id, person_id) => Heading::Attributed { id, person_id },
    }
  }
}

// ─── Ingestion inputs ────────────────────────────────────────────────────────

/// Input for [`JournalItem::from_dict`](crate::JournalItem::from_dict).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalItemInput {
  #[serde(alias = "id_")]
  pub id:                 TextOrNumber,
  pub title:              Option<String>,
  pub record_types:       Option<OneOrMany<String>>,
  pub authors:            Option<OneOrMany<PersonRef>>,
  pub cocreators:         Option<OneOrMany<CoCreatorRef>>,
  pub languages:          Option<Vec<String>>,
  pub linked_ids:         Option<Vec<serde_json::Value>>,
  pub elb_id:             TextOrNumber,
  pub journal_str:        Option<String>,
  pub journal_year_str:   TextOrNumber,
  pub journal_number_str: TextOrNumber,
  pub pages:              TextOrNumber,
  pub annotation:         Option<String>,
  pub tags:               Option<Vec<String>>,
  pub headings:           Option<Vec<HeadingRef>>,
  pub genre_major:        Option<Vec<String>>,
  pub subject_persons:    Option<Vec<PersonRef>>,
}

impl JournalItemInput {
  pub fn from_value(value: serde_json::Value) -> Result<Self> {
    Ok(serde_json::from_value(value)?)
  }
}

/// Input for [`JournalItem::from_retro`](crate::JournalItem::from_retro).
///
/// Identical to [`JournalItemInput`] except that retro extracts carry `tags`
/// as a single bare string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetroJournalItemInput {
  #[serde(alias = "id_")]
  pub id:                 TextOrNumber,
  pub title:              Option<String>,
  pub record_types:       Option<OneOrMany<String>>,
  pub authors:            Option<OneOrMany<PersonRef>>,
  pub cocreators:         Option<OneOrMany<CoCreatorRef>>,
  pub languages:          Option<Vec<String>>,
  pub linked_ids:         Option<Vec<serde_json::Value>>,
  pub elb_id:             TextOrNumber,
  pub journal_str:        Option<String>,
  pub journal_year_str:   TextOrNumber,
  pub journal_number_str: TextOrNumber,
  pub pages:              TextOrNumber,
  pub annotation:         Option<String>,
  pub tags:               Option<OneOrMany<String>>,
  pub headings:           Option<Vec<HeadingRef>>,
  pub genre_major:        Option<Vec<String>>,
  pub subject_persons:    Option<Vec<PersonRef>>,
}

impl RetroJournalItemInput {
  pub fn from_value(value: serde_json::Value) -> Result<Self> {
    Ok(serde_json::from_value(value)?)
  }
}

impl From<RetroJournalItemInput> for JournalItemInput {
  fn from(retro: RetroJournalItemInput) -> Self {
    Self {
      id:                 retro.id,
      title:              retro.title,
      record_types:       retro.record_types,
      authors:            retro.authors,
      cocreators:         retro.cocreators,
      languages:          retro.languages,
      linked_ids:         retro.linked_ids,
      elb_id:             retro.elb_id,
      journal_str:        retro.journal_str,
      journal_year_str:   retro.journal_year_str,
      journal_number_str: retro.journal_number_str,
      pages:              retro.pages,
      annotation:         retro.annotation,
      tags:               retro.tags.map(Vec::from),
      headings:           retro.headings,
      genre_major:        retro.genre_major,
      subject_persons:    retro.subject_persons,
    }
  }
}
