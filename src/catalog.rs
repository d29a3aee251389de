//! Browse-time filtering and facet aggregation over a collection snapshot.

use crate::db::models::Book;
use crate::taxonomy::{BookType, CategoryIndex, FictionType, SelectedFilterSet, Taxonomy};

/// Everything a visitor can narrow the book list by.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub selected: SelectedFilterSet,
    pub book_type: Option<BookType>,
    /// Books without a fiction type count as Non-Fiction, as in the index.
    pub fiction_type: Option<FictionType>,
    pub year: Option<i64>,
    /// Case-insensitive substring of title or author.
    pub search: Option<String>,
}

impl CatalogQuery {
    pub fn with_tags(selected: SelectedFilterSet) -> Self {
        Self {
            selected,
            ..Self::default()
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        if self.book_type.is_some_and(|bt| bt != book.book_type) {
            return false;
        }
        if self
            .fiction_type
            .is_some_and(|ft| ft != book.fiction_type_or_default())
        {
            return false;
        }
        if self.year.is_some() && self.year != book.year {
            return false;
        }
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            if !book.title.to_lowercase().contains(&term)
                && !book.author.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        book.matches(&self.selected)
    }

    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books.iter().filter(|b| self.matches(b)).collect()
    }
}

/// Rebuild the sidebar index from a full snapshot.
pub fn build_index(books: &[Book], taxonomy: &Taxonomy) -> CategoryIndex {
    let summaries: Vec<_> = books.iter().map(|b| b.summary(taxonomy)).collect();
    let index = CategoryIndex::build(&summaries);
    tracing::debug!(
        "Category index rebuilt: {} books, {} distinct tags",
        books.len(),
        index.distinct_tags()
    );
    index
}
