//! XML rendering for PBL journal items.
//!
//! Every catalogue entity knows how to turn itself into an [`Element`]
//! through [`ToElement`]; [`DocumentBuilder`] strings rendered items together
//! into one UTF-8 document using `quick-xml`'s writer.
//!
//! # Quick start
//!
//! ```no_run
//! use pbl_core::{JournalItem, input::JournalItemInput};
//! use pbl_xml::{DocumentBuilder, ToElement};
//!
//! let item = JournalItem::from_dict(JournalItemInput::default());
//! println!("{}", item.to_element().to_xml_string().unwrap());
//!
//! let mut doc = DocumentBuilder::new(2).unwrap();
//! doc.push(&item).unwrap();
//! let bytes = doc.finish().unwrap();
//! ```

mod document;
mod element;
pub mod error;
mod render;

pub use document::{DocumentBuilder, ROOT_ELEMENT};
pub use element::Element;
pub use error::{Error, Result};
pub use render::ToElement;
