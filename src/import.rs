//! Loading book records from JSON exports into the catalog.
//!
//! Exports come from several upstream tools that disagree on field names
//! (`type` vs `book_type`, `fictionType` vs `fiction_type`, `category` as a
//! single string). Those variants are resolved here into the fixed
//! [`NewBook`] shape; nothing downstream sees them.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;

use crate::db::DbPool;
use crate::db::queries::books::{self, NewBook};
use crate::taxonomy::{BookType, FictionType};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub imported: u64,
    pub skipped: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read import file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("import file {path} is not a JSON array of records: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("database error during import: {0}")]
    Db(#[from] sqlx::Error),
}

/// One record as found in an export file.
#[derive(Debug, Default, Deserialize)]
pub struct ImportRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "authors")]
    pub author: Option<serde_json::Value>,
    #[serde(default, rename = "type", alias = "book_type", alias = "bookType")]
    pub book_type: Option<String>,
    #[serde(default, alias = "fictionType")]
    pub fiction_type: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, alias = "category")]
    pub categories: Option<serde_json::Value>,
    #[serde(default, alias = "publication_year", alias = "published")]
    pub year: Option<serde_json::Value>,
}

/// Why a record was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    UnknownBookType(String),
}

impl ImportRecord {
    pub fn into_new_book(self) -> Result<NewBook, SkipReason> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(SkipReason::MissingTitle)?;

        let book_type = match self.book_type.as_deref().map(str::trim) {
            None | Some("") => BookType::Ebook,
            Some(raw) => {
                BookType::parse(raw).ok_or_else(|| SkipReason::UnknownBookType(raw.to_string()))?
            }
        };

        Ok(NewBook {
            title,
            author: self.author.map(|a| string_list(&a).join(", ")).unwrap_or_default(),
            book_type,
            fiction_type: self.fiction_type.as_deref().and_then(FictionType::parse),
            genre: self.genre.map(|g| g.trim().to_string()).filter(|g| !g.is_empty()),
            categories: self.categories.map(|c| string_list(&c)).unwrap_or_default(),
            year: self.year.as_ref().and_then(parse_year),
        })
    }
}

/// Strings from a JSON string or array; other shapes and non-string items
/// are dropped.
fn string_list(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::String(s) => vec![s.clone()],
        serde_json::Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
}

/// Publication year from a number, a bare year string or an ISO date.
fn parse_year(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .map(|d| i64::from(d.year()))
            })
        }
        _ => None,
    }
}

/// Parse an export file into records. Records that do not deserialize at all
/// are counted as skipped.
pub fn read_records(path: &Path) -> Result<(Vec<ImportRecord>, u64), ImportError> {
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let values: Vec<serde_json::Value> =
        serde_json::from_str(&content).map_err(|e| ImportError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut records = Vec::with_capacity(values.len());
    let mut malformed = 0;
    for (i, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<ImportRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Skipping malformed record #{i}: {e}");
                malformed += 1;
            }
        }
    }
    Ok((records, malformed))
}

/// Import an export file. With `replace`, the existing collection is removed first.
pub async fn import_file(
    pool: &DbPool,
    path: &Path,
    replace: bool,
) -> Result<ImportStats, ImportError> {
    let (records, malformed) = read_records(path)?;
    let mut stats = ImportStats {
        imported: 0,
        skipped: malformed,
    };

    // Any failed insert rolls back the whole import, including the delete.
    let mut tx = pool.inner().begin().await?;
    if replace {
        let removed = books::delete_all_on(&mut tx).await?;
        tracing::info!("Removing {removed} existing books before import");
    }

    let imported_at = Utc::now().to_rfc3339();
    for record in records {
        match record.into_new_book() {
            Ok(book) => {
                books::insert_on(pool, &mut tx, &book, &imported_at).await?;
                stats.imported += 1;
            }
            Err(reason) => {
                tracing::warn!("Skipping record: {reason:?}");
                stats.skipped += 1;
            }
        }
    }

    tx.commit().await?;

    tracing::info!(
        "Import of {} finished: imported={}, skipped={}",
        path.display(),
        stats.imported,
        stats.skipped
    );
    Ok(stats)
}
