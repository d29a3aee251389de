use std::collections::HashSet;

/// Scraped category words that carry no catalog meaning.
///
/// "fiction" is noise as a tag; whether a book is fiction is the separate
/// `FictionType` attribute.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "kindle ebooks",
    "kindle e-books",
    "ebooks",
    "kindle",
    "fiction",
    "non-fiction",
    "nonfiction",
    "non fiction",
];

/// Tags that must never reach a `TagSet` or the category index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blacklist {
    entries: HashSet<String>,
}

impl Blacklist {
    /// Entries are trimmed and lower-cased so they compare against canonical tags.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    pub fn is_blacklisted(&self, tag: &str) -> bool {
        self.entries.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLIST)
    }
}
