//! Whole-document assembly.

use std::io::Cursor;

use pbl_core::JournalItem;
use quick_xml::{
  Writer,
  events::{BytesDecl, BytesEnd, BytesStart, Event},
};

use crate::{
  element::{Element, write_event},
  error::Result,
  render::ToElement,
};

/// Name of the element wrapping every journal item in a document.
pub const ROOT_ELEMENT: &str = "journal-items";

/// Streams rendered journal items into one UTF-8 XML document.
pub struct DocumentBuilder {
  writer: Writer<Cursor<Vec<u8>>>,
  items:  usize,
}

impl DocumentBuilder {
  /// Start a document. `indent` is the number of spaces per nesting level;
  /// `0` writes everything on one line.
  pub fn new(indent: usize) -> Result<Self> {
    let cursor = Cursor::new(Vec::new());
    let mut writer = if indent == 0 {
      Writer::new(cursor)
    } else {
      Writer::new_with_indent(cursor, b' ', indent)
    };

    write_event(
      &mut writer,
      Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    write_event(&mut writer, Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

    Ok(Self { writer, items: 0 })
  }

  pub fn push(&mut self, item: &JournalItem) -> Result<&mut Self> {
    self.push_element(&item.to_element())
  }

  /// Append an already rendered element.
  pub fn push_element(&mut self, element: &Element) -> Result<&mut Self> {
    element.write_to(&mut self.writer)?;
    self.items += 1;
    Ok(self)
  }

  /// Number of elements written so far.
  pub fn len(&self) -> usize { self.items }

  pub fn is_empty(&self) -> bool { self.items == 0 }

  pub fn finish(mut self) -> Result<Vec<u8>> {
    write_event(&mut self.writer, Event::End(BytesEnd::new(ROOT_ELEMENT)))?;
    Ok(self.writer.into_inner().into_inner())
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use pbl_core::{input::JournalItemInput, record::Collection};
  use serde_json::json;

  use super::*;

  fn item(title: &str) -> JournalItem {
    JournalItem::build(
      JournalItemInput::from_value(json!({ "title": title })).unwrap(),
      Collection::Retro,
      NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    )
  }

  #[test]
  fn empty_document_has_declaration_and_root() {
    let bytes = DocumentBuilder::new(0).unwrap().finish().unwrap();
    assert_eq!(
      String::from_utf8(bytes).unwrap(),
      r#"<?xml version="1.0" encoding="UTF-8"?><journal-items></journal-items>"#
    );
  }

  #[test]
  fn items_are_written_in_order() {
    let mut doc = DocumentBuilder::new(2).unwrap();
    doc.push(&item("Pierwszy")).unwrap().push(&item("Drugi")).unwrap();
    assert_eq!(doc.len(), 2);

    let xml = String::from_utf8(doc.finish().unwrap()).unwrap();
    let first = xml.find("Pierwszy").unwrap();
    let second = xml.find("Drugi").unwrap();
    assert!(first < second);
    assert_eq!(xml.matches("<journal-item ").count(), 2);
    assert!(xml.contains("\n  <journal-item "));
    assert!(xml.trim_end().ends_with("</journal-items>"));
  }

  #[test]
  fn document_is_utf8_with_polish_text() {
    let mut doc = DocumentBuilder::new(0).unwrap();
    doc.push(&item("Żółć i gęślą jaźń")).unwrap();
    let xml = String::from_utf8(doc.finish().unwrap()).unwrap();
    assert!(xml.contains(">Żółć i gęślą jaźń</title>"));
    assert!(
      xml.contains(r#"<collection code="polska-bibliografia-literacka-1944-1988"/>"#)
    );
  }
}
