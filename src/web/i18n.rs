use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Locale used when a requested locale has no translation file.
pub const FALLBACK_LOCALE: &str = "de";

/// Translations loaded from TOML locale files.
/// Key: locale code ("de", "en"), Value: parsed TOML as JSON value.
pub type Translations = HashMap<String, serde_json::Value>;

/// Load all `.toml` files from the given directory.
/// Each file stem becomes the locale key (e.g., `de.toml` → "de").
pub fn load_translations(dir: &Path) -> Result<Translations, TranslationError> {
    let mut map = Translations::new();

    let entries = std::fs::read_dir(dir).map_err(|e| TranslationError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| TranslationError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        let Some(locale) = path.file_stem().and_then(|s| s.to_str()).map(String::from) else {
            continue;
        };

        let content = std::fs::read_to_string(&path).map_err(|e| TranslationError::Io {
            path: path.clone(),
            source: e,
        })?;
        let toml_value: toml::Value =
            toml::from_str(&content).map_err(|e| TranslationError::Parse {
                path: path.clone(),
                source: e,
            })?;
        let json_value = serde_json::to_value(&toml_value)
            .map_err(|e| TranslationError::Convert { source: e })?;

        map.insert(locale, json_value);
    }

    if !map.contains_key(FALLBACK_LOCALE) {
        return Err(TranslationError::MissingFallback {
            path: dir.to_path_buf(),
        });
    }

    Ok(map)
}

/// Locale files shipped in the crate's `locales/` directory.
pub fn load_runtime_translations() -> Result<Translations, TranslationError> {
    load_translations(&PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("locales"))
}

/// Get the translation object for a locale, falling back to German.
pub fn get_locale<'a>(translations: &'a Translations, locale: &str) -> Option<&'a serde_json::Value> {
    translations
        .get(locale)
        .or_else(|| translations.get(FALLBACK_LOCALE))
}

/// Resolve a dotted key such as `categories.science fiction`.
///
/// Returns the key unchanged when no translation exists, so callers can tell
/// a miss from a hit by comparing against the key.
pub fn translate(translations: &Translations, locale: &str, key: &str) -> String {
    get_locale(translations, locale)
        .and_then(|root| lookup(root, key))
        .map(String::from)
        .unwrap_or_else(|| key.to_string())
}

/// Whole-key match first, then descend on the first dot. Tag keys may
/// themselves contain dots ("u.s. history").
fn lookup<'a>(value: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    if let Some(s) = value.get(key).and_then(|v| v.as_str()) {
        return Some(s);
    }
    let (head, rest) = key.split_once('.')?;
    lookup(value.get(head)?, rest)
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("failed to read locale directory {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse locale file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to convert TOML to JSON: {source}")]
    Convert { source: serde_json::Error },
    #[error("no de.toml locale file found in {path}")]
    MissingFallback { path: PathBuf },
}
