//! Per-genre aggregation of series ratings on top of `QuadMap`

use std::fmt;

use crate::{QuadMap, utils::MapExtensions};

/// Separator printed between a summary's count and its lines
const SEPARATOR: &str = "-----------------------------------";

/// Series recorded under one genre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreSummary {
    /// Number of series recorded
    count: usize,
    /// One `"{title} rated {rating}"` line per series, in recording order
    lines: Vec<String>,
}

impl GenreSummary {
    /// Starts a summary with its first series
    #[must_use]
    pub fn new(title: &str, rating: i32) -> Self {
        Self { count: 1, lines: vec![format!("{title} rated {rating}")] }
    }

    /// Records one more series
    pub fn update(&mut self, title: &str, rating: i32) {
        self.count = self.count.saturating_add(1);
        self.lines.push(format!("{title} rated {rating}"));
    }

    /// Number of series recorded
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Recorded lines in order
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for GenreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} series in this genre.", self.count)?;
        write!(f, "{SEPARATOR}")?;
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

/// Genre statistics keyed by genre name
#[derive(Debug, Clone, Default)]
pub struct GenreStats {
    /// Summary per genre
    table: QuadMap<String, GenreSummary>,
}

impl GenreStats {
    /// Creates empty statistics
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `title` with `rating` under `genre`
    pub fn record(&mut self, genre: &str, title: &str, rating: i32) {
        if let Some(summary) = self.table.get_mut(genre) {
            summary.update(title, rating);
        } else {
            self.table.put(genre.to_owned(), GenreSummary::new(title, rating));
        }
    }

    /// Summary recorded for `genre`, if any
    #[must_use]
    pub fn lookup(&self, genre: &str) -> Option<&GenreSummary> {
        self.table.get(genre)
    }

    /// Every genre seen, sorted
    #[must_use]
    pub fn genres(&self) -> Vec<String> {
        self.table.sorted_keys()
    }

    /// Number of distinct genres
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Forgets every genre
    pub fn clear(&mut self) {
        self.table.clear();
    }
}
