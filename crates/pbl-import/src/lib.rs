//! Batch import driver for PBL journal items.
//!
//! Reads raw records and authority tables from JSON, builds and links a
//! [`JournalItem`] per record, and writes them all as one XML document.

pub mod error;

pub use error::{Error, Result};

use std::{
  fs::File,
  io::{BufReader, Read},
  path::{Path, PathBuf},
};

use pbl_core::{
  JournalItem, LinkReport,
  authority::{JournalIndex, JournalRecord, PersonEntry, PersonIndex},
  input::{JournalItemInput, RetroJournalItemInput},
};
use pbl_xml::DocumentBuilder;
use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Import settings, deserialised from `pbl-import.toml` and `PBL_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
  /// JSON array of raw journal-item records.
  pub records_path:  PathBuf,
  #[serde(default)]
  pub persons_path:  Option<PathBuf>,
  #[serde(default)]
  pub journals_path: Option<PathBuf>,
  pub output_path:   PathBuf,
  /// Treat the records as retro-converted input.
  #[serde(default)]
  pub retro:         bool,
  /// Overrides the default `creator` attribution.
  #[serde(default)]
  pub creator:       Option<String>,
  /// Spaces per nesting level in the output; `0` disables indentation.
  #[serde(default = "default_indent")]
  pub indent:        usize,
}

fn default_indent() -> usize { 2 }

// ─── Loading ──────────────────────────────────────────────────────────────────

/// Parse a JSON array of raw records and build one item per record.
///
/// A record with an unrecognised field aborts the whole load; the error
/// names the record's position in the array.
pub fn read_records(reader: impl Read, retro: bool) -> Result<Vec<JournalItem>> {
  let raw: Vec<serde_json::Value> = serde_json::from_reader(reader)?;

  raw
    .into_iter()
    .enumerate()
    .map(|(index, value)| {
      let item = if retro {
        RetroJournalItemInput::from_value(value).map(JournalItem::from_retro)
      } else {
        JournalItemInput::from_value(value).map(JournalItem::from_dict)
      };
      item.map_err(|source| Error::Record { index, source })
    })
    .collect()
}

pub fn read_persons(reader: impl Read) -> Result<PersonIndex> {
  let entries: Vec<PersonEntry> = serde_json::from_reader(reader)?;
  Ok(PersonIndex::from_entries(entries)?)
}

pub fn read_journals(reader: impl Read) -> Result<JournalIndex> {
  let records: Vec<JournalRecord> = serde_json::from_reader(reader)?;
  Ok(JournalIndex::from_records(records)?)
}

fn open(path: &Path) -> Result<BufReader<File>> {
  File::open(path).map(BufReader::new).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })
}

// ─── Pipeline ─────────────────────────────────────────────────────────────────

/// What a run did, for the closing log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
  pub records:  usize,
  pub persons:  LinkReport,
  pub journals: LinkReport,
}

/// Linking and attribution applied to every record.
#[derive(Debug, Default)]
pub struct Pipeline {
  pub persons:  Option<PersonIndex>,
  pub journals: Option<JournalIndex>,
  pub creator:  Option<String>,
}

impl Pipeline {
  pub fn process(
    &self,
    mut item: JournalItem,
    summary: &mut ImportSummary,
  ) -> JournalItem {
    if let Some(creator) = &self.creator {
      item.creator = creator.clone();
    }
    if let Some(persons) = &self.persons {
      let (linked, report) = item.connect_with_persons(persons);
      summary.persons += report;
      item = linked;
    }
    if let Some(journals) = &self.journals {
      let (linked, report) = item.connect_with_journals(journals);
      summary.journals += report;
      item = linked;
    }
    summary.records += 1;
    item
  }

  /// Process `items` and render them into one document.
  pub fn render(
    &self,
    items: Vec<JournalItem>,
    indent: usize,
  ) -> Result<(Vec<u8>, ImportSummary)> {
    let mut summary = ImportSummary::default();
    let mut doc = DocumentBuilder::new(indent)?;
    for item in items {
      let item = self.process(item, &mut summary);
      doc.push(&item)?;
    }
    Ok((doc.finish()?, summary))
  }
}

/// Run a full import as described by `config`.
pub fn run(config: &ImportConfig) -> Result<ImportSummary> {
  let persons = match &config.persons_path {
    Some(path) => {
      let index = read_persons(open(path)?)?;
      tracing::info!(?path, people = index.len(), "loaded person authority");
      Some(index)
    }
    None => None,
  };
  let journals = match &config.journals_path {
    Some(path) => {
      let index = read_journals(open(path)?)?;
      tracing::info!(?path, journals = index.len(), "loaded journal authority");
      Some(index)
    }
    None => None,
  };

  let items = read_records(open(&config.records_path)?, config.retro)?;
  tracing::info!(
    path = ?config.records_path,
    records = items.len(),
    retro = config.retro,
    "loaded records"
  );

  let pipeline = Pipeline {
    persons,
    journals,
    creator: config.creator.clone(),
  };
  let (bytes, summary) = pipeline.render(items, config.indent)?;

  std::fs::write(&config.output_path, bytes).map_err(|source| Error::Io {
    path: config.output_path.clone(),
    source,
  })?;

  Ok(summary)
}

#[cfg(test)]
mod tests {
  use super::*;

  const RECORDS: &str = r#"[
    {
      "id": 900,
      "title": "Pan Cogito",
      "authors": [["", "Zbigniew Herbert"]],
      "headings": ["h-herbert"],
      "genre_major": ["Literature"],
      "journal_str": "Twórczość",
      "journal_year_str": "1990",
      "journal_number_str": "3",
      "pages": "5-9"
    },
    {
      "title": "O Herbercie",
      "subject_persons": [["", "Zbigniew Herbert"]],
      "genre_major": ["Secondary literature"]
    }
  ]"#;

  const PERSONS: &str = r#"[
    { "id": "Q1", "names": ["Zbigniew Herbert"], "headings": ["h-herbert"] }
  ]"#;

  const JOURNALS: &str = r#"[
    {
      "name": "Twórczość",
      "id": "Q100",
      "years": [
        { "year": "1990", "id": "Q101", "numbers": [{ "number": "3", "id": "Q102" }] }
      ]
    }
  ]"#;

  fn pipeline() -> Pipeline {
    Pipeline {
      persons:  Some(read_persons(PERSONS.as_bytes()).unwrap()),
      journals: Some(read_journals(JOURNALS.as_bytes()).unwrap()),
      creator:  None,
    }
  }

  #[test]
  fn reads_modern_and_retro_records() {
    let modern = read_records(RECORDS.as_bytes(), false).unwrap();
    assert_eq!(modern.len(), 2);
    assert_eq!(
      modern[0].collection.code(),
      "polska-bibliografia-literacka-1989-"
    );

    let retro = read_records(r##"[{ "tags": "#ji-retro" }]"##.as_bytes(), true)
      .unwrap();
    assert_eq!(
      retro[0].collection.code(),
      "polska-bibliografia-literacka-1944-1988"
    );
    assert_eq!(retro[0].tags, vec!["#ji-retro"]);
  }

  #[test]
  fn modern_bare_tag_string_is_rejected() {
    let err = read_records(r##"[{ "tags": "#ji-nike" }]"##.as_bytes(), false)
      .unwrap_err();
    assert!(matches!(err, Error::Record { index: 0, .. }));
  }

  #[test]
  fn unknown_field_reports_record_position() {
    let err = read_records(
      r#"[{ "title": "ok" }, { "title": "bad", "isbn": "x" }]"#.as_bytes(),
      false,
    )
    .unwrap_err();

    assert!(matches!(err, Error::Record { index: 1, .. }));
    assert!(err.to_string().contains("isbn"));
  }

  #[test]
  fn malformed_authority_id_is_rejected() {
    let err =
      read_persons(r#"[{ "id": "viaf-1", "names": ["X"] }]"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, Error::Authority(_)));
  }

  #[test]
  fn pipeline_links_and_renders() {
    let items = read_records(RECORDS.as_bytes(), false).unwrap();
    let (bytes, summary) = pipeline().render(items, 0).unwrap();
    let xml = String::from_utf8(bytes).unwrap();

    assert_eq!(summary.records, 2);
    assert_eq!(summary.persons, LinkReport { matched: 2, unmatched: 0 });
    assert_eq!(summary.journals, LinkReport { matched: 1, unmatched: 0 });

    assert!(xml.contains(
      r#"<author id="http://www.wikidata.org/entity/Q1" juvenile="false" co-creator="false" principal="true"/>"#
    ));
    assert!(xml.contains(
      r#"<heading id="h-herbert" person-id="http://www.wikidata.org/entity/Q1"/>"#
    ));
    assert!(!xml.contains(r#"<heading id="h-herbert"/>"#));
    assert!(xml.contains(
      "<journal-source>\
       <journal-number id=\"http://www.wikidata.org/entity/Q102\"/>\
       <journal-year id=\"http://www.wikidata.org/entity/Q101\"/>\
       <journal id=\"http://www.wikidata.org/entity/Q100\"/>\
       <pages>5-9</pages>\
       </journal-source>"
    ));
    // The second record is about Herbert, not by him.
    assert_eq!(xml.matches(r#"anonymous="true""#).count(), 1);
  }

  #[test]
  fn creator_override_is_applied() {
    let pipeline = Pipeline {
      creator: Some("a_margraf".to_string()),
      ..Pipeline::default()
    };
    let items = read_records(r#"[{ "title": "T" }]"#.as_bytes(), false).unwrap();
    let (bytes, summary) = pipeline.render(items, 0).unwrap();

    assert!(String::from_utf8(bytes).unwrap().contains(r#"creator="a_margraf""#));
    assert_eq!(summary.persons, LinkReport::default());
  }

  #[test]
  fn run_writes_output_file() {
    let dir = std::env::temp_dir()
      .join(format!("pbl-import-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let records_path = dir.join("records.json");
    let persons_path = dir.join("persons.json");
    let output_path = dir.join("out.xml");
    std::fs::write(&records_path, RECORDS).unwrap();
    std::fs::write(&persons_path, PERSONS).unwrap();

    let summary = run(&ImportConfig {
      records_path,
      persons_path: Some(persons_path),
      journals_path: None,
      output_path: output_path.clone(),
      retro: false,
      creator: None,
      indent: 2,
    })
    .unwrap();

    let xml = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(summary.records, 2);
    assert_eq!(summary.journals, LinkReport::default());
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert_eq!(xml.matches("<journal-item ").count(), 2);

    std::fs::remove_dir_all(&dir).ok();
  }

  #[test]
  fn missing_records_file_names_the_path() {
    let err = run(&ImportConfig {
      records_path:  PathBuf::from("/nonexistent/records.json"),
      persons_path:  None,
      journals_path: None,
      output_path:   PathBuf::from("/nonexistent/out.xml"),
      retro:         false,
      creator:       None,
      indent:        0,
    })
    .unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("records.json"));
  }
}
