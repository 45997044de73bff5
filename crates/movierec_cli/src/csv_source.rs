//! CSV ratings reader.
//!
//! # Responsibility
//! - Read a headed CSV file into raw records for `RatingStore::load`.
//! - Reject files whose header lacks the required columns or names the item
//!   column twice (`item` and `movie`).
//!
//! # Invariants
//! - The header row never reaches the core.
//! - Cell validation (blank values, non-numeric ratings) is left to the core.

use log::debug;
use movierec_core::RawRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Accepted header names for the item column.
const ITEM_COLUMNS: &[&str] = &["item", "movie"];

/// Failure reading the ratings file.
#[derive(Debug)]
pub enum CsvSourceError {
    /// File could not be opened or a row could not be decoded.
    Csv { path: PathBuf, source: csv::Error },
    /// File has no header row.
    Empty { path: PathBuf },
    /// Header row is missing required columns.
    MissingColumns {
        path: PathBuf,
        missing: Vec<&'static str>,
    },
    /// Header row carries both `item` and `movie`.
    AmbiguousItemColumn { path: PathBuf },
}

impl Display for CsvSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Empty { path } => write!(f, "the file `{}` is empty", path.display()),
            Self::MissingColumns { path, missing } => write!(
                f,
                "the file `{}` must contain 'user', 'movie' and 'rating' columns (missing: {})",
                path.display(),
                missing.join(", ")
            ),
            Self::AmbiguousItemColumn { path } => write!(
                f,
                "the file `{}` has both 'item' and 'movie' columns; keep only one",
                path.display()
            ),
        }
    }
}

impl Error for CsvSourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Reads every data row of `path` as a raw record.
///
/// # Errors
/// - `Csv` when the file cannot be opened or a row is not valid CSV.
/// - `Empty` when the file has no header row.
/// - `MissingColumns` when `user`, `rating` or an item column is absent.
/// - `AmbiguousItemColumn` when both `item` and `movie` are present.
pub fn read_records(path: &Path) -> Result<Vec<RawRecord>, CsvSourceError> {
    let csv_error = |source| CsvSourceError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(CsvSourceError::Empty {
            path: path.to_path_buf(),
        });
    }

    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(CsvSourceError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        });
    }
    if item_column_count(&headers) > 1 {
        return Err(CsvSourceError::AmbiguousItemColumn {
            path: path.to_path_buf(),
        });
    }

    let records = reader
        .deserialize::<RawRecord>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error)?;

    debug!("event=csv_read module=cli status=ok rows={}", records.len());
    Ok(records)
}

fn missing_columns(headers: &csv::StringRecord) -> Vec<&'static str> {
    let has = |name: &str| headers.iter().any(|header| header == name);

    let mut missing = Vec::new();
    if !has("user") {
        missing.push("user");
    }
    if item_column_count(headers) == 0 {
        missing.push("movie");
    }
    if !has("rating") {
        missing.push("rating");
    }
    missing
}

fn item_column_count(headers: &csv::StringRecord) -> usize {
    headers
        .iter()
        .filter(|header| ITEM_COLUMNS.contains(header))
        .count()
}
