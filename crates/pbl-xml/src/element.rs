//! A small owned XML element tree.
//!
//! Rendering builds the whole tree first so callers can inspect or embed it
//! before anything is written.

use std::io::{Cursor, Write};

use quick_xml::{
  Writer,
  events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
  pub name:       String,
  /// In output order.
  pub attributes: Vec<(String, String)>,
  pub text:       Option<String>,
  pub children:   Vec<Element>,
}

impl Element {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:       name.into(),
      attributes: Vec::new(),
      text:       None,
      children:   Vec::new(),
    }
  }

  pub fn with_attr(
    mut self,
    key: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.attributes.push((key.into(), value.into()));
    self
  }

  /// Add the attribute only when `value` is non-empty.
  pub fn with_attr_if_present(self, key: &str, value: &str) -> Self {
    if value.is_empty() {
      self
    } else {
      self.with_attr(key, value)
    }
  }

  pub fn with_text(mut self, text: impl Into<String>) -> Self {
    self.text = Some(text.into());
    self
  }

  pub fn with_child(mut self, child: Element) -> Self {
    self.children.push(child);
    self
  }

  pub fn with_children(
    mut self,
    children: impl IntoIterator<Item = Element>,
  ) -> Self {
    self.children.extend(children);
    self
  }

  pub fn push(&mut self, child: Element) { self.children.push(child); }

  pub fn attr(&self, key: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }

  /// First direct child with the given name.
  pub fn child(&self, name: &str) -> Option<&Element> {
    self.children.iter().find(|c| c.name == name)
  }

  pub fn children_named<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Iterator<Item = &'a Element> + 'a {
    self.children.iter().filter(move |c| c.name == name)
  }

  /// Names of the direct children, in order.
  pub fn child_names(&self) -> Vec<&str> {
    self.children.iter().map(|c| c.name.as_str()).collect()
  }

  /// Write this element and its subtree as events. Elements with neither
  /// text nor children are written self-closing.
  pub fn write_to<W: Write>(&self, w: &mut Writer<W>) -> Result<()> {
    let mut start = BytesStart::new(self.name.as_str());
    for (key, value) in &self.attributes {
      start.push_attribute((key.as_str(), value.as_str()));
    }

    if self.text.is_none() && self.children.is_empty() {
      return write_event(w, Event::Empty(start));
    }

    write_event(w, Event::Start(start))?;
    if let Some(text) = &self.text {
      write_event(w, Event::Text(BytesText::new(text)))?;
    }
    for child in &self.children {
      child.write_to(w)?;
    }
    write_event(w, Event::End(BytesEnd::new(self.name.as_str())))
  }

  /// Serialise without any whitespace between elements.
  pub fn to_xml_string(&self) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    self.write_to(&mut writer)?;
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
  }

  /// Serialise with `indent` spaces per nesting level.
  pub fn to_xml_string_indented(&self, indent: usize) -> Result<String> {
    let mut writer =
      Writer::new_with_indent(Cursor::new(Vec::new()), b' ', indent);
    self.write_to(&mut writer)?;
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
  }
}

pub(crate) fn write_event<W: Write>(
  w: &mut Writer<W>,
  event: Event<'_>,
) -> Result<()> {
  w.write_event(event).map_err(|e| Error::Xml(e.to_string()))
}
