//! Core types for the PBL journal-item pipeline.
//!
//! Builds [`JournalItem`] records from raw catalogue input, links their
//! people and journal sources against authority tables, and leaves the
//! result ready for rendering by `pbl-xml`. No I/O happens here.

pub mod authority;
pub mod error;
pub mod id;
pub mod input;
pub mod link;
pub mod record;


pub use error::{Error, Result};
pub use link::LinkReport;
pub use record::JournalItem;
