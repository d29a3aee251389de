use std::collections::BTreeSet;

use serde::Serialize;

/// Category tags a visitor has selected in the sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectedFilterSet(BTreeSet<String>);

impl SelectedFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma-joined `tags` query value. Blank items are ignored.
    pub fn from_query(value: &str) -> Self {
        Self(
            value
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// Comma-joined form accepted by [`SelectedFilterSet::from_query`].
    pub fn to_query(&self) -> String {
        self.0.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }

    /// Add the tag if absent, remove it if present.
    pub fn toggle(&mut self, tag: &str) {
        if !self.0.remove(tag) {
            self.0.insert(tag.to_string());
        }
    }

    /// A copy with `tag` toggled, for building facet links.
    pub fn toggled(&self, tag: &str) -> Self {
        let mut next = self.clone();
        next.toggle(tag);
        next
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectedFilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Whether a book passes the selection.
///
/// Every selected tag must occur, case-insensitively, as a substring of one of
/// the raw categories or of the raw genre. An empty selection passes all books.
pub fn matches(categories: &[String], genre: Option<&str>, selected: &SelectedFilterSet) -> bool {
    if selected.is_empty() {
        return true;
    }

    let haystacks: Vec<String> = categories
        .iter()
        .map(String::as_str)
        .chain(genre)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect();
    if haystacks.is_empty() {
        return false;
    }

    selected.iter().all(|tag| {
        let needle = tag.to_lowercase();
        haystacks.iter().any(|h| h.contains(&needle))
    })
}
