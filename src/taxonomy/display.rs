/// Translation key prefix for curated category labels.
pub const KEY_PREFIX: &str = "categories.";

/// Human-readable label for a canonical tag.
///
/// `localize` follows the i18n convention of returning the key itself (or
/// nothing) when no translation exists; in that case the tag is title-cased.
pub fn format_tag<F>(tag: &str, localize: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let key = format!("{KEY_PREFIX}{tag}");
    match localize(&key) {
        Some(label) if label != key => label,
        _ => title_case(tag),
    }
}

/// Upper-case the first letter of every whitespace-delimited word. Spacing
/// is kept as is.
pub fn title_case(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut word_start = true;
    for c in tag.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
