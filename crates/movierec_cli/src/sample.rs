//! Demo dataset bootstrapping.
//!
//! Writes a small ratings file when the requested one does not exist, so the
//! tool can be tried without preparing data first.

use crate::csv_source::CsvSourceError;
use log::info;
use serde::Serialize;
use std::path::Path;

const SAMPLE_RATINGS: &[(&str, &str, u8)] = &[
    ("Alice", "The Matrix", 5),
    ("Alice", "Inception", 4),
    ("Alice", "The Godfather", 3),
    ("Alice", "Pulp Fiction", 5),
    ("Bob", "The Matrix", 4),
    ("Bob", "Inception", 5),
    ("Bob", "The Dark Knight", 5),
    ("Bob", "Forrest Gump", 2),
    ("Charlie", "The Godfather", 5),
    ("Charlie", "Pulp Fiction", 4),
    ("Charlie", "The Dark Knight", 3),
    ("David", "Inception", 3),
    ("David", "The Dark Knight", 4),
    ("David", "Forrest Gump", 5),
    ("David", "The Matrix", 2),
    ("Eve", "Pulp Fiction", 5),
    ("Eve", "The Godfather", 4),
    ("Eve", "The Matrix", 4),
    ("Frank", "The Dark Knight", 5),
    ("Frank", "Forrest Gump", 5),
    ("Frank", "Inception", 4),
];

#[derive(Serialize)]
struct SampleRow<'a> {
    user: &'a str,
    movie: &'a str,
    rating: u8,
}

/// Writes the demo dataset to `path` unless a file already exists there.
///
/// Returns `true` when the file was created.
pub fn ensure_sample_dataset(path: &Path) -> Result<bool, CsvSourceError> {
    if path.exists() {
        return Ok(false);
    }

    let csv_error = |source| CsvSourceError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for &(user, movie, rating) in SAMPLE_RATINGS {
        writer
            .serialize(SampleRow {
                user,
                movie,
                rating,
            })
            .map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|err| csv_error(csv::Error::from(err)))?;

    info!(
        "event=sample_created module=cli status=ok rows={}",
        SAMPLE_RATINGS.len()
    );
    Ok(true)
}
