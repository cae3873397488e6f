//! Loader for comma-separated series listings

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::{error::DatasetError, stats::GenreStats};

/// Column holding the series title
const TITLE_FIELD: usize = 0;
/// Column holding the `|`-separated genres
const GENRES_FIELD: usize = 4;
/// Column holding the decimal rating
const RATING_FIELD: usize = 5;

/// A series listing on disk.
///
/// The first line is a header. Each following line has at least six
/// comma-separated fields: the title first, the genres in the fifth and a
/// decimal rating in the sixth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Location of the file
    path: PathBuf,
}

impl Dataset {
    /// Points at the file at `path`; nothing is read yet
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Location of the file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file and aggregates every series by genre
    ///
    /// # Errors
    ///
    /// [`DatasetError::Io`] if the file cannot be opened,
    /// [`DatasetError::Read`] if reading stops part way.
    pub fn load(&self) -> Result<GenreStats, DatasetError> {
        let file = File::open(&self.path)
            .map_err(|source| DatasetError::Io { path: self.path.clone(), source })?;
        let stats = parse(BufReader::new(file))?;
        info!("loaded {} genres from {}", stats.len(), self.path.display());
        Ok(stats)
    }
}

/// Aggregates the rows of `reader` by genre, skipping the header line
///
/// # Errors
///
/// [`DatasetError::Read`] if the reader fails.
pub fn parse<R: BufRead>(reader: R) -> Result<GenreStats, DatasetError> {
    let mut stats = GenreStats::new();
    let mut skipped: usize = 0;
    for (index, line) in reader.lines().enumerate().skip(1) {
        let number = index.saturating_add(1);
        let line = line.map_err(|source| DatasetError::Read { line: number, source })?;
        if line.trim().is_empty() {
            continue;
        }
        let Some((title, genres, rating)) = split_row(&line) else {
            warn!("skipping malformed row {number}: {line}");
            skipped = skipped.saturating_add(1);
            continue;
        };
        for genre in genres.split('|') {
            stats.record(genre, title, rating);
        }
    }
    if skipped > 0 {
        info!("skipped {skipped} malformed rows");
    }
    Ok(stats)
}

/// Title, genres and truncated rating of one row
fn split_row(line: &str) -> Option<(&str, &str, i32)> {
    let fields: Vec<&str> = line.split(',').collect();
    let title = *fields.get(TITLE_FIELD)?;
    let genres = *fields.get(GENRES_FIELD)?;
    let rating = fields.get(RATING_FIELD)?.trim().parse::<f64>().ok()?;
    if !rating.is_finite() {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let rating = rating.trunc() as i32;
    Some((title, genres, rating))
}
