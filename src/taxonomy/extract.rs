use std::sync::LazyLock;

use regex::Regex;

/// Trailing `(<digits>)` count annotations as found on scraped retail categories.
static COUNT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s*\(\d+\))+$").expect("count suffix pattern is valid"));

/// Hierarchy-marker characters a raw category string is split on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separators(Vec<char>);

impl Separators {
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut list: Vec<char> = Vec::new();
        for c in chars {
            if !list.contains(&c) {
                list.push(c);
            }
        }
        Self(list)
    }

    /// The default set plus `/`, used where path-like genres are expected.
    pub fn with_slash() -> Self {
        Self::new(['>', '&', ',', '/'])
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    pub fn as_string(&self) -> String {
        self.0.iter().collect()
    }
}

impl Default for Separators {
    fn default() -> Self {
        Self::new(['>', '&', ','])
    }
}

/// Split a raw category or genre string into canonical tags.
///
/// Parts are trimmed, stripped of trailing `(<digits>)` counts, lower-cased
/// and dropped when one character or shorter. Order follows the input;
/// duplicates inside a single raw string are kept.
pub fn extract(raw: &str, separators: &Separators) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.split(|c: char| separators.contains(c))
        .filter_map(normalize_part)
        .collect()
}

fn normalize_part(part: &str) -> Option<String> {
    let trimmed = part.trim();
    if trimmed.is_empty() {
        return None;
    }
    let stripped = COUNT_SUFFIX.replace(trimmed, "");
    let tag = stripped.trim().to_lowercase();
    (tag.chars().count() > 1).then_some(tag)
}
