//! The catalog store: the ordered, read-only sequence of movie records.
//!
//! Loading never fails. A missing or unreadable source produces an empty
//! catalog and one log line; everything downstream treats "empty" as a normal
//! state rather than an error.

use crate::parser;
use crate::types::{MovieRecord, RowId};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Ordered movie records, indexed by row id
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
}

impl Catalog {
    /// Load the catalog from a CSV file.
    ///
    /// Any failure (missing file, malformed CSV, missing columns) is logged
    /// and yields an empty catalog.
    #[instrument]
    pub fn load(path: &Path) -> Self {
        let start = Instant::now();
        match parser::parse_catalog(path) {
            Ok(movies) => {
                info!(
                    "Dataset loaded successfully with {} movies in {:?}",
                    movies.len(),
                    start.elapsed()
                );
                Self { movies }
            }
            Err(e) => {
                error!("Dataset could not be loaded from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Wrap records that are already in memory
    pub fn from_records(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }

    /// All records, in row-id order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn get(&self, row: RowId) -> Option<&MovieRecord> {
        self.movies.get(row)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Give up the store and take the records
    pub fn into_records(self) -> Vec<MovieRecord> {
        self.movies
    }
}
