//! Authority tables consulted by entity linking.
//!
//! Linking only depends on the [`PersonAuthority`] and [`JournalAuthority`]
//! traits. How a table is built is up to the caller; [`PersonIndex`] and
//! [`JournalIndex`] are the in-memory tables used by the import driver.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{Result, id::normalize_entity_id};

// ─── Records ─────────────────────────────────────────────────────────────────

/// A matched person: canonical identifier plus the headings filed under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonRecord {
  pub id:       String,
  pub headings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JournalNumber {
  pub number: String,
  pub id:     String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JournalYear {
  pub year:    String,
  pub id:      String,
  #[serde(default)]
  pub numbers: Vec<JournalNumber>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JournalRecord {
  pub name:  String,
  pub id:    String,
  #[serde(default)]
  pub years: Vec<JournalYear>,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Person lookups. Names and identifiers are compared verbatim.
pub trait PersonAuthority {
  fn by_name(&self, name: &str) -> Option<&PersonRecord>;

  /// `id` is a canonical entity URI.
  fn by_id(&self, id: &str) -> Option<&PersonRecord>;
}

pub trait JournalAuthority {
  fn by_name(&self, name: &str) -> Option<&JournalRecord>;
}

/// A plain map keyed by both display names and canonical identifiers.
impl PersonAuthority for HashMap<String, PersonRecord> {
  fn by_name(&self, name: &str) -> Option<&PersonRecord> { self.get(name) }

  fn by_id(&self, id: &str) -> Option<&PersonRecord> { self.get(id) }
}

impl JournalAuthority for HashMap<String, JournalRecord> {
  fn by_name(&self, name: &str) -> Option<&JournalRecord> { self.get(name) }
}

// ─── In-memory indexes ───────────────────────────────────────────────────────

/// One person as listed in an authority file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonEntry {
  pub id:       String,
  #[serde(default)]
  pub names:    Vec<String>,
  #[serde(default)]
  pub headings: Vec<String>,
}

/// Person table indexed under every listed name and under its identifier.
#[derive(Debug, Default)]
pub struct PersonIndex {
  records: Vec<PersonRecord>,
  by_name: HashMap<String, usize>,
  by_id:   HashMap<String, usize>,
}

impl PersonIndex {
  /// Build the index, normalising every identifier to its canonical URI.
  ///
  /// When two entries claim the same name or identifier the first one
  /// wins.
  pub fn from_entries(
    entries: impl IntoIterator<Item = PersonEntry>,
  ) -> Result<Self> {
    let mut index = Self::default();
    for entry in entries {
      index.insert(entry)?;
    }
    Ok(index)
  }

  pub fn insert(&mut self, entry: PersonEntry) -> Result<()> {
    let id = normalize_entity_id(&entry.id)?;
    let slot = self.records.len();
    self.records.push(PersonRecord {
      id:       id.clone(),
      headings: entry.headings,
    });

    if !id.is_empty() {
      claim(&mut self.by_id, id, slot, "person id");
    }
    for name in entry.names {
      claim(&mut self.by_name, name, slot, "person name");
    }
    Ok(())
  }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

impl PersonAuthority for PersonIndex {
  fn by_name(&self, name: &str) -> Option<&PersonRecord> {
    self.by_name.get(name).map(|&slot| &self.records[slot])
  }

  fn by_id(&self, id: &str) -> Option<&PersonRecord> {
    self.by_id.get(id).map(|&slot| &self.records[slot])
  }
}

/// Journal table indexed by journal name.
#[derive(Debug, Default)]
pub struct JournalIndex {
  journals: HashMap<String, JournalRecord>,
}

impl JournalIndex {
  /// Build the index, normalising journal, year and number identifiers.
  pub fn from_records(
    records: impl IntoIterator<Item = JournalRecord>,
  ) -> Result<Self> {
    let mut index = Self::default();
    for record in records {
      index.insert(record)?;
    }
    Ok(index)
  }

  pub fn insert(&mut self, mut record: JournalRecord) -> Result<()> {
    record.id = normalize_entity_id(&record.id)?;
    for year in &mut record.years {
      year.id = normalize_entity_id(&year.id)?;
      for number in &mut year.numbers {
        number.id = normalize_entity_id(&number.id)?;
      }
    }

    if self.journals.contains_key(&record.name) {
      tracing::warn!(name = %record.name, "duplicate journal name; keeping first");
    } else {
      self.journals.insert(record.name.clone(), record);
    }
    Ok(())
  }

  pub fn len(&self) -> usize { self.journals.len() }

  pub fn is_empty(&self) -> bool { self.journals.is_empty() }
}

impl JournalAuthority for JournalIndex {
  fn by_name(&self, name: &str) -> Option<&JournalRecord> {
    self.journals.get(name)
  }
}

fn claim(
  keys: &mut HashMap<String, usize>,
  key: String,
  slot: usize,
  what: &str,
) {
  if keys.contains_key(&key) {
    tracing::warn!(%key, "duplicate {what}; keeping first");
  } else {
    keys.insert(key, slot);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(id: &str, names: &[&str], headings: &[&str]) -> PersonEntry {
    PersonEntry {
      id:       id.to_string(),
      names:    names.iter().map(|s| s.to_string()).collect(),
      headings: headings.iter().map(|s| s.to_string()).collect(),
    }
  }

  #[test]
  fn person_index_answers_by_name_and_by_id() {
    let index = PersonIndex::from_entries([entry(
      "Q1",
      &["Adam Mickiewicz", "Mickiewicz, Adam"],
      &["h1"],
    )])
    .unwrap();

    let uri = "http://www.wikidata.org/entity/Q1";
    assert_eq!(index.by_name("Adam Mickiewicz").unwrap().id, uri);
    assert_eq!(index.by_name("Mickiewicz, Adam").unwrap().id, uri);
    assert_eq!(index.by_id(uri).unwrap().headings, vec!["h1"]);
    assert!(index.by_id("Q1").is_none());
    assert!(index.by_name("adam mickiewicz").is_none());
    assert_eq!(index.len(), 1);
  }

  #[test]
  fn first_person_claiming_a_name_wins() {
    let index = PersonIndex::from_entries([
      entry("1", &["Jan Kowalski"], &["first"]),
      entry("2", &["Jan Kowalski"], &["second"]),
    ])
    .unwrap();

    assert_eq!(index.by_name("Jan Kowalski").unwrap().headings, vec![
      "first"
    ]);
    assert!(index.by_id("http://www.wikidata.org/entity/Q2").is_some());
  }

  #[test]
  fn person_index_rejects_malformed_ids() {
    assert!(PersonIndex::from_entries([entry("viaf:1", &["X"], &[])]).is_err());
  }

  #[test]
  fn journal_index_normalizes_nested_ids() {
    let index = JournalIndex::from_records([JournalRecord {
      name:  "Twórczość".to_string(),
      id:    "10".to_string(),
      years: vec![JournalYear {
        year:    "1990".to_string(),
        id:      "Q11".to_string(),
        numbers: vec![JournalNumber {
          number: "3".to_string(),
          id:     "12".to_string(),
        }],
      }],
    }])
    .unwrap();

    let journal = index.by_name("Twórczość").unwrap();
    assert_eq!(journal.id, "http://www.wikidata.org/entity/Q10");
    assert_eq!(journal.years[0].id, "http://www.wikidata.org/entity/Q11");
    assert_eq!(
      journal.years[0].numbers[0].id,
      "http://www.wikidata.org/entity/Q12"
    );
  }

  #[test]
  fn hash_map_serves_both_person_lookups() {
    let record = PersonRecord {
      id:       "http://www.wikidata.org/entity/Q1".to_string(),
      headings: vec!["h1".to_string()],
    };
    let table = HashMap::from([
      ("A".to_string(), record.clone()),
      (record.id.clone(), record.clone()),
    ]);

    assert_eq!(table.by_name("A"), Some(&record));
    assert_eq!(table.by_id(&record.id), Some(&record));
  }
}
