//! Journal item → element tree.
//!
//! Optional containers are emitted only when their backing field is
//! populated, and always in the order the import schema expects.

use pbl_core::{
  JournalItem,
  record::{Author, CoCreator, Heading, Source, Title},
};

use crate::element::Element;

/// Renders a catalogue entity as a single element.
pub trait ToElement {
  fn to_element(&self) -> Element;
}

fn flag(value: bool) -> &'static str { if value { "true" } else { "false" } }

impl ToElement for Author {
  fn to_element(&self) -> Element {
    Element::new("author")
      .with_attr("id", &self.id)
      .with_attr("juvenile", flag(self.juvenile))
      .with_attr("co-creator", flag(self.co_creator))
      .with_attr("principal", flag(self.principal))
  }
}

impl ToElement for CoCreator {
  fn to_element(&self) -> Element {
    Element::new("co-creator")
      .with_children(
        self
          .roles
          .iter()
          .map(|role| Element::new("type").with_attr("code", role)),
      )
      .with_child(Element::new("person").with_attr("id", &self.id))
  }
}

impl ToElement for Title {
  fn to_element(&self) -> Element {
    let el = Element::new("title")
      .with_attr("code", self.code)
      .with_attr("transliteration", flag(self.transliteration))
      .with_attr("newest", flag(self.newest));
    if self.value.is_empty() { el } else { el.with_text(&self.value) }
  }
}

impl ToElement for Source {
  fn to_element(&self) -> Element {
    let mut el = Element::new("journal-source");
    for (name, id) in [
      ("journal-number", &self.number_id),
      ("journal-year", &self.year_id),
      ("journal", &self.journal_id),
    ] {
      if !id.is_empty() {
        el.push(Element::new(name).with_attr("id", id));
      }
    }
    if !self.pages.is_empty() {
      el.push(Element::new("pages").with_text(&self.pages));
    }
    el
  }
}

/// A heading attributed to nobody is not rendered.
fn heading_element(heading: &Heading) -> Option<Element> {
  match heading {
    Heading::Bare(id) => Some(Element::new("heading").with_attr("id", id)),
    Heading::Attributed { person_id, .. } if person_id.is_empty() => None,
    Heading::Attributed { id, person_id } => Some(
      Element::new("heading")
        .with_attr("id", id)
        .with_attr("person-id", person_id),
    ),
  }
}

/// Wrap the rendered `members` in a `name` element, or emit nothing when
/// there are none.
fn container<T>(
  name: &str,
  members: &[T],
  render: impl Fn(&T) -> Element,
) -> Option<Element> {
  if members.is_empty() {
    return None;
  }
  Some(Element::new(name).with_children(members.iter().map(render)))
}

impl ToElement for JournalItem {
  fn to_element(&self) -> Element {
    let date = self.date.to_string();
    let publishing_date = self.publishing_date.to_string();

    let mut root = Element::new("journal-item")
      .with_attr_if_present("id", self.id.as_deref().unwrap_or_default())
      .with_attr_if_present("status", self.status)
      .with_attr_if_present("creator", &self.creator)
      .with_attr_if_present("creation-date", &date)
      .with_attr_if_present("publishing-date", &publishing_date)
      .with_attr_if_present("origin", &self.origin)
      .with_attr_if_present("flags", &self.flags);

    if let Some(el) = container("record-types", &self.record_types, |code| {
      Element::new("record-type").with_attr("code", code)
    }) {
      root.push(el);
    }

    // Always true for journal items, whatever the stored flag says.
    root.push(Element::new("general-materials").with_attr("value", "true"));

    root.push(
      Element::new("authors")
        .with_attr("anonymous", flag(self.is_anonymous()))
        .with_attr("author-company", "false")
        .with_children(self.authors.iter().map(ToElement::to_element)),
    );

    let optional = [
      container("co-creators", &self.cocreators, ToElement::to_element),
      Some(Element::new("titles").with_child(self.title.to_element())),
      container("languages", &self.languages, |code| {
        Element::new("language").with_attr("code", code)
      }),
      (!self.headings.is_empty()).then(|| {
        Element::new("headings")
          .with_children(self.headings.iter().filter_map(heading_element))
      }),
      container("source-origin", &self.sources, ToElement::to_element),
      (!self.annotation.is_empty())
        .then(|| Element::new("annotation").with_text(&self.annotation)),
      container("tags", &self.tags, |tag| Element::new("tag").with_text(tag)),
      Some(
        Element::new("collection").with_attr("code", self.collection.code()),
      ),
    ];
    root.with_children(optional.into_iter().flatten())
  }
}
