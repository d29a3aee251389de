//! Category normalization and faceted filtering.
//!
//! Raw category and genre strings (scraped retail metadata or manual entry)
//! become canonical tag sets, which drive badges, the filter predicate and
//! the sidebar index:
//!
//! raw fields → [`extract`] → [`Blacklist`] → [`TagSet`] →
//! {[`format_tag`], [`matches`], [`CategoryIndex`]}

mod blacklist;
mod display;
mod extract;
mod filter;
mod index;
mod tagset;

use serde::{Deserialize, Serialize};

pub use blacklist::{Blacklist, DEFAULT_BLACKLIST};
pub use display::{KEY_PREFIX, format_tag, title_case};
pub use extract::{Separators, extract};
pub use filter::{SelectedFilterSet, matches};
pub use index::{BookSummary, CategoryIndex, TagCounts};
pub use tagset::TagSet;

/// Separator and blacklist settings shared by every normalization step.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    separators: Separators,
    blacklist: Blacklist,
}

impl Taxonomy {
    pub fn new(separators: Separators, blacklist: Blacklist) -> Self {
        Self {
            separators,
            blacklist,
        }
    }

    pub fn separators(&self) -> &Separators {
        &self.separators
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Tag set of a single book.
    pub fn tags(&self, categories: &[String], genre: Option<&str>) -> TagSet {
        TagSet::build(categories, genre, self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookType {
    Ebook,
    Audiobook,
}

impl BookType {
    pub const ALL: [BookType; 2] = [BookType::Ebook, BookType::Audiobook];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Ebook => "ebook",
            BookType::Audiobook => "audiobook",
        }
    }

    /// Accepts the stored names plus the German labels used by the import feeds.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "ebook" | "e-book" => Some(BookType::Ebook),
            "audiobook" | "hörbuch" | "hoerbuch" => Some(BookType::Audiobook),
            _ => None,
        }
    }
}

/// Structured fiction marker, distinct from free-text category tags.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum FictionType {
    Fiction,
    #[default]
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl FictionType {
    pub const ALL: [FictionType; 2] = [FictionType::Fiction, FictionType::NonFiction];

    pub fn as_str(&self) -> &'static str {
        match self {
            FictionType::Fiction => "Fiction",
            FictionType::NonFiction => "Non-Fiction",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "fiction" | "belletristik" => Some(FictionType::Fiction),
            "non-fiction" | "nonfiction" | "non fiction" | "sachbuch" => {
                Some(FictionType::NonFiction)
            }
            _ => None,
        }
    }
}
