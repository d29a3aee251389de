use serde::Serialize;

use super::{Taxonomy, extract};

/// Unique, blacklist-free canonical tags of one book, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Normalize every category entry and the genre into one tag set.
    pub fn build(categories: &[String], genre: Option<&str>, taxonomy: &Taxonomy) -> Self {
        let raw_fields = categories
            .iter()
            .map(String::as_str)
            .chain(genre);

        let mut tags: Vec<String> = Vec::new();
        for raw in raw_fields {
            for tag in extract(raw, taxonomy.separators()) {
                if taxonomy.blacklist().is_blacklisted(&tag) || tags.contains(&tag) {
                    continue;
                }
                tags.push(tag);
            }
        }
        Self(tags)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
