//! Case-insensitive substring filter over one catalog column.
//!
//! Matching is plain substring containment, not token equality: the genre
//! token "fi" matches "Sci-Fi", and the director "nolan" matches
//! "Christopher Nolan".

use crate::traits::Filter;
use catalog::{DIRECTOR, GENRES, KEYWORDS, MovieRecord, RowId};

/// Keeps rows whose `column` contains `needle`, ignoring case
pub struct FieldContainsFilter {
    name: String,
    column: &'static str,
    needle: String,
}

impl FieldContainsFilter {
    /// Create a filter on an arbitrary text column
    pub fn new(column: &'static str, needle: &str) -> Self {
        let needle = needle.to_lowercase();
        Self {
            name: format!("{}~{}", column, needle),
            column,
            needle,
        }
    }

    /// One genre token against the `genres` column
    pub fn genre(token: &str) -> Self {
        Self::new(GENRES, token)
    }

    /// The whole director string against the `director` column
    pub fn director(name: &str) -> Self {
        Self::new(DIRECTOR, name)
    }

    /// One keyword token against the `keywords` column
    pub fn keyword(token: &str) -> Self {
        Self::new(KEYWORDS, token)
    }

    fn matches(&self, movie: &MovieRecord) -> bool {
        movie.text(self.column).to_lowercase().contains(&self.needle)
    }
}

impl Filter for FieldContainsFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, candidates: Vec<RowId>, movies: &[MovieRecord]) -> Vec<RowId> {
        candidates
            .into_iter()
            .filter(|&row| movies.get(row).is_some_and(|movie| self.matches(movie)))
            .collect()
    }
}
