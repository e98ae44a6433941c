//! The journal-item record and its sub-entities.
//!
//! A [`JournalItem`] is built once from raw input (see [`crate::input`]),
//! optionally linked against authority tables (see [`crate::link`]) and then
//! rendered. Identifier fields hold canonical URIs or the empty string.

use chrono::{Local, NaiveDate};

use crate::{
  id::entity_uri,
  input::{HeadingRef, JournalItemInput, PersonRef, RetroJournalItemInput},
};

/// Attribution written into every record's `creator` attribute.
pub const DEFAULT_CREATOR: &str = "cezary_rosinski";

/// Publication status of every generated record.
pub const PUBLISHED: &str = "published";

// ─── Collection ──────────────────────────────────────────────────────────────

/// The historical corpus a record belongs to; fixed per ingestion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
  /// Bibliography volumes from 1989 onward.
  Modern,
  /// Retro-converted volumes covering 1944–1988.
  Retro,
}

impl Collection {
  pub fn code(&self) -> &'static str {
    match self {
      Self::Modern => "polska-bibliografia-literacka-1989-",
      Self::Retro => "polska-bibliografia-literacka-1944-1988",
    }
  }
}

// ─── Genre ───────────────────────────────────────────────────────────────────

/// Major genre label. Only the two named variants steer heading aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Genre {
  Literature,
  SecondaryLiterature,
  Other(String),
}

impl From<String> for Genre {
  fn from(label: String) -> Self {
    match label.as_str() {
      "Literature" => Self::Literature,
      "Secondary literature" => Self::SecondaryLiterature,
      _ => Self::Other(label),
    }
  }
}

// ─── Headings ────────────────────────────────────────────────────────────────

/// A catalogue heading reference, optionally attributed to a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
  Bare(String),
  Attributed { id: String, person_id: String },
}

impl Heading {
  pub fn id(&self) -> &str {
    match self {
      Self::Bare(id) | Self::Attributed { id, .. } => id,
    }
  }
}

// ─── People ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
  pub id:         String,
  pub name:       String,
  pub juvenile:   bool,
  pub co_creator: bool,
  pub principal:  bool,
  /// Filled only by person linking.
  pub headings:   Vec<String>,
}

impl Author {
  pub fn new(code: &str, name: impl Into<String>) -> Self {
    Self {
      id:         entity_uri(code),
      name:       name.into(),
      juvenile:   false,
      co_creator: false,
      principal:  true,
      headings:   Vec::new(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoCreator {
  pub id:    String,
  pub name:  String,
  /// Role codes such as `translation` or `adaptation`, without repeats.
  pub roles: Vec<String>,
}

impl CoCreator {
  pub fn new(
    code: &str,
    name: impl Into<String>,
    roles: impl IntoIterator<Item = String>,
  ) -> Self {
    Self {
      id:    entity_uri(code),
      name:  name.into(),
      roles: dedup(roles),
    }
  }
}

/// A person the item is about (as opposed to by).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPerson {
  pub id:       String,
  pub name:     String,
  pub headings: Vec<String>,
}

impl SubjectPerson {
  pub fn new(code: &str, name: impl Into<String>) -> Self {
    Self {
      id:       entity_uri(code),
      name:     name.into(),
      headings: Vec::new(),
    }
  }
}

// ─── Title ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
  pub value:           String,
  pub code:            &'static str,
  pub newest:          bool,
  pub transliteration: bool,
}

impl Title {
  pub fn new(value: &str) -> Self {
    Self {
      value:           value.trim().to_string(),
      code:            "base",
      newest:          true,
      transliteration: false,
    }
  }
}

// ─── Source ──────────────────────────────────────────────────────────────────

/// Where the item was published: journal, year and issue as printed, plus
/// the authority identifiers found for them by journal linking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
  pub journal:    String,
  pub year:       String,
  pub number:     String,
  pub journal_id: String,
  pub year_id:    String,
  pub number_id:  String,
  pub pages:      String,
}

impl Source {
  pub fn new(
    journal: impl Into<String>,
    year: impl Into<String>,
    number: impl Into<String>,
    pages: impl Into<String>,
  ) -> Self {
    Self {
      journal: journal.into(),
      year: year.into(),
      number: number.into(),
      pages: pages.into(),
      ..Self::default()
    }
  }
}

/// Reference to another catalogue object. Carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedObject(pub serde_json::Value);

// ─── JournalItem ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalItem {
  pub id:                Option<String>,
  pub creator:           String,
  pub status:            &'static str,
  pub date:              NaiveDate,
  pub publishing_date:   NaiveDate,
  pub origin:            String,
  pub flags:             String,
  /// Identifier of the upstream source record; never rendered.
  pub elb_id:            Option<String>,
  /// Stored for completeness; rendering always emits `true`.
  pub general_materials: bool,
  pub title:             Title,
  pub record_types:      Vec<String>,
  pub authors:           Vec<Author>,
  pub cocreators:        Vec<CoCreator>,
  pub languages:         Vec<String>,
  pub headings:          Vec<Heading>,
  pub linked_objects:    Vec<LinkedObject>,
  pub sources:           Vec<Source>,
  pub annotation:        String,
  pub tags:              Vec<String>,
  pub collection:        Collection,
  pub genre_major:       Vec<Genre>,
  pub subject_persons:   Vec<SubjectPerson>,
}

impl JournalItem {
  /// Build a record from the current bibliography's input.
  pub fn from_dict(input: JournalItemInput) -> Self {
    Self::build(input, Collection::Modern, Local::now().date_naive())
  }

  /// Build a record from retro-converted input.
  pub fn from_retro(input: RetroJournalItemInput) -> Self {
    Self::build(input.into(), Collection::Retro, Local::now().date_naive())
  }

  /// The builder behind both ingestion paths.
  pub fn build(
    input: JournalItemInput,
    collection: Collection,
    date: NaiveDate,
  ) -> Self {
    let id = entity_uri(input.id.as_str());

    let journal = input.journal_str.unwrap_or_default();
    let year = input.journal_year_str.into_string();
    let number = input.journal_number_str.into_string();
    let sources = if !journal.is_empty() && !year.is_empty() && !number.is_empty()
    {
      vec![Source::new(
        journal,
        year,
        number,
        input.pages.into_string(),
      )]
    } else {
      Vec::new()
    };

    Self {
      id: (!id.is_empty()).then_some(id),
      creator: DEFAULT_CREATOR.to_string(),
      status: PUBLISHED,
      date,
      publishing_date: date,
      origin: String::new(),
      flags: String::new(),
      elb_id: Some(input.elb_id.into_string()).filter(|s| !s.is_empty()),
      general_materials: false,
      title: Title::new(input.title.as_deref().unwrap_or_default()),
      record_types: dedup(input.record_types.unwrap_or_default()),
      authors: input
        .authors
        .unwrap_or_default()
        .into_iter()
        .map(|PersonRef(code, name)| Author::new(code.as_str(), name))
        .collect(),
      cocreators: input
        .cocreators
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
          let (code, name, roles) = entry.into_parts();
          CoCreator::new(code.as_str(), name, roles)
        })
        .collect(),
      languages: input.languages.unwrap_or_default(),
      headings: input
        .headings
        .unwrap_or_default()
        .into_iter()
        .map(HeadingRef::into_heading)
        .collect(),
      linked_objects: input
        .linked_ids
        .unwrap_or_default()
        .into_iter()
        .map(LinkedObject)
        .collect(),
      sources,
      annotation: input.annotation.unwrap_or_default(),
      tags: input.tags.unwrap_or_default(),
      collection,
      genre_major: dedup(input.genre_major.unwrap_or_default())
        .into_iter()
        .map(Genre::from)
        .collect(),
      subject_persons: input
        .subject_persons
        .unwrap_or_default()
        .into_iter()
        .map(|PersonRef(code, name)| SubjectPerson::new(code.as_str(), name))
        .collect(),
    }
  }

  /// An item with no authors is catalogued as anonymous.
  pub fn is_anonymous(&self) -> bool { self.authors.is_empty() }
}

/// Drop repeated values, keeping the first occurrence of each.
fn dedup(values: impl IntoIterator<Item = String>) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  for value in values {
    if !out.contains(&value) {
      out.push(value);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn author_defaults() {
    let author = Author::new("5", "Wisława Szymborska");
    assert_eq!(author.id, "http://www.wikidata.org/entity/Q5");
    assert!(!author.juvenile);
    assert!(!author.co_creator);
    assert!(author.principal);
    assert!(author.headings.is_empty());
  }

  #[test]
  fn unidentified_people_have_empty_ids() {
    assert_eq!(Author::new("", "A").id, "");
    assert_eq!(SubjectPerson::new("", "B").id, "");
    assert_eq!(CoCreator::new("", "C", Vec::new()).id, "");
  }

  #[test]
  fn cocreator_roles_keep_first_occurrence() {
    let c = CoCreator::new(
      "9",
      "Stanisław Barańczak",
      ["translation", "adaptation", "translation"].map(String::from),
    );
    assert_eq!(c.roles, vec!["translation", "adaptation"]);
  }

  #[test]
  fn title_is_trimmed() {
    let title = Title::new("  Wiersze zebrane \n");
    assert_eq!(title.value, "Wiersze zebrane");
    assert_eq!(title.code, "base");
    assert!(title.newest);
    assert!(!title.transliteration);
  }

  #[test]
  fn genre_labels() {
    assert_eq!(Genre::from("Literature".to_string()), Genre::Literature);
    assert_eq!(
      Genre::from("Secondary literature".to_string()),
      Genre::SecondaryLiterature
    );
    assert_eq!(
      Genre::from("Drama".to_string()),
      Genre::Other("Drama".to_string())
    );
  }

  #[test]
  fn collection_codes() {
    assert_eq!(
      Collection::Modern.code(),
      "polska-bibliografia-literacka-1989-"
    );
    assert_eq!(
      Collection::Retro.code(),
      "polska-bibliografia-literacka-1944-1988"
    );
  }
}
