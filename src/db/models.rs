use serde::Serialize;
use sqlx::FromRow;

use crate::taxonomy::{BookSummary, BookType, FictionType, SelectedFilterSet, TagSet, Taxonomy};

/// A `books` row as stored.
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub book_type: String,
    pub fiction_type: Option<String>,
    pub genre: Option<String>,
    pub categories: Option<String>,
    pub year: Option<i64>,
    pub imported_at: String,
}

/// A catalog book with its taxonomy fields decoded.
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub book_type: BookType,
    pub fiction_type: Option<FictionType>,
    pub genre: Option<String>,
    pub categories: Vec<String>,
    pub year: Option<i64>,
    pub imported_at: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        let book_type = BookType::parse(&row.book_type).unwrap_or_else(|| {
            tracing::warn!(
                "Book {} has unknown type {:?}, treating as ebook",
                row.id,
                row.book_type
            );
            BookType::Ebook
        });
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            book_type,
            fiction_type: row.fiction_type.as_deref().and_then(FictionType::parse),
            genre: row.genre.filter(|g| !g.trim().is_empty()),
            categories: decode_categories(row.categories.as_deref()),
            year: row.year,
            imported_at: row.imported_at,
        }
    }
}

impl Book {
    pub fn tags(&self, taxonomy: &Taxonomy) -> TagSet {
        taxonomy.tags(&self.categories, self.genre.as_deref())
    }

    pub fn summary(&self, taxonomy: &Taxonomy) -> BookSummary {
        BookSummary {
            book_type: self.book_type,
            fiction_type: self.fiction_type,
            tags: self.tags(taxonomy),
        }
    }

    pub fn matches(&self, selected: &SelectedFilterSet) -> bool {
        crate::taxonomy::matches(&self.categories, self.genre.as_deref(), selected)
    }

    /// Fiction type as the sidebar buckets it.
    pub fn fiction_type_or_default(&self) -> FictionType {
        self.fiction_type.unwrap_or_default()
    }
}

/// Decode the stored categories column. Anything that is not a JSON array of
/// strings degrades to fewer (or no) categories; a bare JSON string counts as
/// one category.
pub fn decode_categories(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Ok(serde_json::Value::String(s)) => vec![s],
        Ok(_) => Vec::new(),
        Err(e) => {
            tracing::debug!("Ignoring undecodable categories value: {e}");
            Vec::new()
        }
    }
}

/// Encode categories for storage; `None` when there are none.
pub fn encode_categories(categories: &[String]) -> Option<String> {
    if categories.is_empty() {
        return None;
    }
    serde_json::to_string(categories).ok()
}
