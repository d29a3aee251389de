use std::collections::BTreeMap;

use serde::Serialize;

use super::{BookType, FictionType, TagSet};

/// The parts of a book the sidebar facets are computed from.
#[derive(Debug, Clone)]
pub struct BookSummary {
    pub book_type: BookType,
    pub fiction_type: Option<FictionType>,
    pub tags: TagSet,
}

pub type TagCounts = BTreeMap<String, u64>;

/// Tag counts grouped by book type, then fiction type.
///
/// Both book types and both fiction types are always present so empty
/// sections can still be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryIndex(BTreeMap<BookType, BTreeMap<FictionType, TagCounts>>);

impl CategoryIndex {
    pub fn empty() -> Self {
        let branches = BookType::ALL
            .iter()
            .map(|bt| {
                let leaves = FictionType::ALL
                    .iter()
                    .map(|ft| (*ft, TagCounts::new()))
                    .collect();
                (*bt, leaves)
            })
            .collect();
        Self(branches)
    }

    /// Count every tag of every book. Books without a fiction type are
    /// bucketed under Non-Fiction.
    pub fn build<'a>(books: impl IntoIterator<Item = &'a BookSummary>) -> Self {
        let mut index = Self::empty();
        for book in books {
            let fiction_type = book.fiction_type.unwrap_or_default();
            let counts = index.counts_mut(book.book_type, fiction_type);
            for tag in &book.tags {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        index
    }

    fn counts_mut(&mut self, book_type: BookType, fiction_type: FictionType) -> &mut TagCounts {
        self.0
            .entry(book_type)
            .or_default()
            .entry(fiction_type)
            .or_default()
    }

    pub fn counts(&self, book_type: BookType, fiction_type: FictionType) -> Option<&TagCounts> {
        self.0.get(&book_type).and_then(|b| b.get(&fiction_type))
    }

    pub fn count(&self, book_type: BookType, fiction_type: FictionType, tag: &str) -> u64 {
        self.counts(book_type, fiction_type)
            .and_then(|c| c.get(tag))
            .copied()
            .unwrap_or(0)
    }

    /// Iterate `(book type, fiction type, counts)` in stable order.
    pub fn sections(&self) -> impl Iterator<Item = (BookType, FictionType, &TagCounts)> {
        self.0
            .iter()
            .flat_map(|(bt, leaves)| leaves.iter().map(move |(ft, c)| (*bt, *ft, c)))
    }

    /// Number of distinct tags across all sections.
    pub fn distinct_tags(&self) -> usize {
        let mut seen: Vec<&str> = self
            .sections()
            .flat_map(|(_, _, c)| c.keys().map(String::as_str))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}
