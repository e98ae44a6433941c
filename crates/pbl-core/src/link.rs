//! Entity linking: resolve people and journal sources against authority
//! tables.
//!
//! Both passes take the record by value and hand back the linked record, so
//! the pre-link and post-link states are never aliased. Lookup misses are
//! not errors; the entity keeps whatever it had.

use std::ops::AddAssign;

use crate::{
  authority::{JournalAuthority, PersonAuthority, PersonRecord},
  record::{Genre, Heading, JournalItem},
};

/// How many entities a linking pass resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkReport {
  pub matched:   usize,
  pub unmatched: usize,
}

impl AddAssign for LinkReport {
  fn add_assign(&mut self, other: Self) {
    self.matched += other.matched;
    self.unmatched += other.unmatched;
  }
}

enum PersonMatch<'a> {
  /// Found by display name; the entity had no identifier.
  Named(&'a PersonRecord),
  /// Found by the identifier the entity already had.
  Identified(&'a PersonRecord),
  Missing,
}

fn match_person<'a, P>(table: &'a P, id: &str, name: &str) -> PersonMatch<'a>
where
  P: PersonAuthority + ?Sized,
{
  let found = if id.is_empty() {
    table.by_name(name).map(PersonMatch::Named)
  } else {
    table.by_id(id).map(PersonMatch::Identified)
  };
  found.unwrap_or_else(|| {
    tracing::debug!(%id, %name, "no authority match for person");
    PersonMatch::Missing
  })
}

impl JournalItem {
  /// Resolve authors, co-creators and subject persons, then fold the
  /// resolved people's headings into the item (see
  /// [`add_authors_headings`](Self::add_authors_headings)).
  pub fn connect_with_persons<P>(mut self, table: &P) -> (Self, LinkReport)
  where
    P: PersonAuthority + ?Sized,
  {
    let mut report = LinkReport::default();

    for author in &mut self.authors {
      match match_person(table, &author.id, &author.name) {
        PersonMatch::Named(person) => {
          author.id = person.id.clone();
          author.headings = person.headings.clone();
          report.matched += 1;
        }
        PersonMatch::Identified(person) => {
          author.headings = person.headings.clone();
          report.matched += 1;
        }
        PersonMatch::Missing => report.unmatched += 1,
      }
    }

    // Co-creators only ever gain an identifier.
    for cocreator in self.cocreators.iter_mut().filter(|c| c.id.is_empty()) {
      match match_person(table, "", &cocreator.name) {
        PersonMatch::Named(person) => {
          cocreator.id = person.id.clone();
          report.matched += 1;
        }
        _ => report.unmatched += 1,
      }
    }

    for subject in &mut self.subject_persons {
      match match_person(table, &subject.id, &subject.name) {
        PersonMatch::Named(person) => {
          subject.id = person.id.clone();
          subject.headings = person.headings.clone();
          report.matched += 1;
        }
        PersonMatch::Identified(person) => {
          subject.headings = person.headings.clone();
          report.matched += 1;
        }
        PersonMatch::Missing => report.unmatched += 1,
      }
    }

    (self.add_authors_headings(), report)
  }

  /// Move person headings onto the item, attributed to their owner.
  ///
  /// Only applies when the item has exactly one major genre: authors'
  /// headings for literature, subject persons' headings for secondary
  /// literature. Bare copies of a migrated heading are removed and each
  /// heading id ends up paired with a single owner.
  pub fn add_authors_headings(mut self) -> Self {
    let [genre] = self.genre_major.as_slice() else {
      return self;
    };

    let owned: Vec<(String, String)> = match genre {
      Genre::Literature => self
        .authors
        .iter()
        .flat_map(|a| a.headings.iter().map(|h| (h.clone(), a.id.clone())))
        .collect(),
      Genre::SecondaryLiterature => self
        .subject_persons
        .iter()
        .flat_map(|s| s.headings.iter().map(|h| (h.clone(), s.id.clone())))
        .collect(),
      Genre::Other(_) => Vec::new(),
    };

    for (heading, owner) in owned {
      self.attribute_heading(heading, owner);
    }
    self
  }

  fn attribute_heading(&mut self, heading: String, owner: String) {
    self
      .headings
      .retain(|h| !matches!(h, Heading::Bare(id) if *id == heading));

    let paired = self.headings.iter_mut().find_map(|h| match h {
      Heading::Attributed { id, person_id } if *id == heading => {
        Some(person_id)
      }
      _ => None,
    });

    match paired {
      Some(person_id) if person_id.is_empty() => *person_id = owner,
      Some(person_id) => {
        if *person_id != owner {
          tracing::debug!(
            %heading, kept = %person_id, skipped = %owner,
            "heading already attributed"
          );
        }
      }
      None => self.headings.push(Heading::Attributed {
        id:        heading,
        person_id: owner,
      }),
    }
  }

  /// Resolve each unidentified source's journal, then its year within that
  /// journal, then its issue number within that year. Each level is only
  /// attempted when the one above it matched.
  pub fn connect_with_journals<J>(mut self, table: &J) -> (Self, LinkReport)
  where
    J: JournalAuthority + ?Sized,
  {
    let mut report = LinkReport::default();

    for source in self.sources.iter_mut().filter(|s| s.journal_id.is_empty()) {
      let Some(journal) = table.by_name(&source.journal) else {
        tracing::debug!(journal = %source.journal, "no authority match for journal");
        report.unmatched += 1;
        continue;
      };
      source.journal_id = journal.id.clone();
      report.matched += 1;

      let Some(year) = journal.years.iter().find(|y| y.year == source.year)
      else {
        tracing::debug!(
          journal = %source.journal, year = %source.year,
          "journal year not found"
        );
        continue;
      };
      source.year_id = year.id.clone();

      match year.numbers.iter().find(|n| n.number == source.number) {
        Some(number) => source.number_id = number.id.clone(),
        None => tracing::debug!(
          journal = %source.journal, year = %source.year,
          number = %source.number, "journal issue not found"
        ),
      }
    }

    (self, report)
  }
}
