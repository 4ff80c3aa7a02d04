//! # Similarity Engine
//!
//! Built once from a catalog:
//! 1. Derive a feature soup per movie
//! 2. Fit TF-IDF over all soups
//! 3. Compute the all-pairs cosine similarity matrix
//! 4. Index titles to row ids (first occurrence wins)
//!
//! After `build` returns nothing is mutated, so one engine can be shared by
//! `Arc` across any number of reader threads without locking. An empty
//! catalog yields an engine in the `Empty` state that answers every query
//! with an empty list.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Instant;

use catalog::{Catalog, FieldValue, MovieRecord, RowId};
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::filter_pipeline::{FilterPipeline, Preferences};
use crate::similarity::SimilarityMatrix;
use crate::soup::{SOUP, create_soup};
use crate::vectorizer::TfidfVectorizer;

/// Externally visible engine state, for health checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// No catalog was available; every query returns nothing
    Empty,
    /// Vector space and similarity matrix are built
    Ready,
}

impl EngineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineStatus::Empty => "empty",
            EngineStatus::Ready => "ready",
        }
    }
}

/// Derived structures, present only when the catalog is non-empty
#[derive(Debug)]
struct VectorSpace {
    similarity: SimilarityMatrix,
    title_index: HashMap<String, RowId>,
    vocabulary_size: usize,
}

#[derive(Debug)]
enum EngineState {
    Empty,
    Ready(VectorSpace),
}

/// Content-based recommender over an immutable catalog
#[derive(Debug)]
pub struct SimilarityEngine {
    movies: Vec<MovieRecord>,
    state: EngineState,
}

impl SimilarityEngine {
    /// Build the engine. Each record gains a `soup` column.
    #[instrument(skip_all, fields(movies = catalog.len()))]
    pub fn build(catalog: Catalog) -> Self {
        let mut movies = catalog.into_records();
        if movies.is_empty() {
            warn!("Catalog is empty, similarity engine will return no results");
            return Self {
                movies,
                state: EngineState::Empty,
            };
        }

        let start = Instant::now();

        let soups: Vec<String> = movies.par_iter().map(create_soup).collect();

        let mut vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&soups);
        debug!(
            "Vectorized {} soups in {:?}",
            soups.len(),
            start.elapsed()
        );

        let similarity = SimilarityMatrix::from_unit_vectors(&vectors);
        let title_index = build_title_index(&movies);

        for (movie, soup) in movies.iter_mut().zip(soups) {
            movie.set(SOUP, FieldValue::Text(soup));
        }

        info!(
            "Similarity engine ready: {} movies, {} terms, {} titles indexed in {:?}",
            movies.len(),
            vectorizer.vocabulary_size(),
            title_index.len(),
            start.elapsed()
        );

        Self {
            movies,
            state: EngineState::Ready(VectorSpace {
                similarity,
                title_index,
                vocabulary_size: vectorizer.vocabulary_size(),
            }),
        }
    }

    pub fn status(&self) -> EngineStatus {
        match self.state {
            EngineState::Empty => EngineStatus::Empty,
            EngineState::Ready(_) => EngineStatus::Ready,
        }
    }

    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        match &self.state {
            EngineState::Empty => 0,
            EngineState::Ready(space) => space.vocabulary_size,
        }
    }

    /// True if `title` is a known lookup key for `get_recommendations`
    pub fn contains_title(&self, title: &str) -> bool {
        self.row_of(title).is_some()
    }

    /// Row id a title resolves to (the first movie carrying it)
    pub fn row_of(&self, title: &str) -> Option<RowId> {
        match &self.state {
            EngineState::Empty => None,
            EngineState::Ready(space) => space.title_index.get(title).copied(),
        }
    }

    /// Cosine similarity between two rows
    pub fn similarity(&self, a: RowId, b: RowId) -> Option<f64> {
        match &self.state {
            EngineState::Empty => None,
            EngineState::Ready(space) => space.similarity.get(a, b),
        }
    }

    /// Every movie, in catalog order
    pub fn get_all_movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Up to `k` movies most similar to `title`, most similar first.
    ///
    /// Scores tie-break on row id ascending. The queried movie itself is
    /// excluded by identity, so a content duplicate is never dropped in its
    /// place. Unknown titles and `k <= 0` give an empty list.
    pub fn get_recommendations(&self, title: &str, k: i64) -> Vec<&MovieRecord> {
        let EngineState::Ready(space) = &self.state else {
            return Vec::new();
        };
        let Some(&idx) = space.title_index.get(title) else {
            debug!("No movie titled {:?}", title);
            return Vec::new();
        };
        let limit = result_limit(k);
        if limit == 0 {
            return Vec::new();
        }

        let mut scores: Vec<(RowId, f64)> = space
            .similarity
            .row(idx)
            .iter()
            .copied()
            .enumerate()
            .filter(|&(row, _)| row != idx)
            .collect();
        scores.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        scores
            .into_iter()
            .take(limit)
            .map(|(row, _)| &self.movies[row])
            .collect()
    }

    /// Up to `k` movies matching every preference, highest rating first.
    ///
    /// Equal ratings keep catalog order; movies without a numeric rating
    /// sort last.
    pub fn get_recommendations_by_preferences(
        &self,
        genres: &str,
        director: &str,
        keywords: &str,
        k: i64,
    ) -> Vec<&MovieRecord> {
        let limit = result_limit(k);
        if limit == 0 || self.movies.is_empty() {
            return Vec::new();
        }

        let preferences = Preferences::parse(genres, director, keywords);
        let pipeline = FilterPipeline::from_preferences(&preferences);
        let mut rows = pipeline.apply((0..self.movies.len()).collect(), &self.movies);
        if rows.is_empty() {
            return Vec::new();
        }

        rows.sort_by(|&a, &b| by_rating_desc(self.movies[a].rating(), self.movies[b].rating()));
        rows.into_iter()
            .take(limit)
            .map(|row| &self.movies[row])
            .collect()
    }

    /// Every movie whose title contains `query`, ignoring case, in catalog order
    pub fn search_movies(&self, query: &str) -> Vec<&MovieRecord> {
        let needle = query.to_lowercase();
        self.movies
            .iter()
            .filter(|movie| movie.title().to_lowercase().contains(&needle))
            .collect()
    }
}

/// Title → row id, keeping the first row for duplicate titles
fn build_title_index(movies: &[MovieRecord]) -> HashMap<String, RowId> {
    let mut index = HashMap::with_capacity(movies.len());
    for (row, movie) in movies.iter().enumerate() {
        index.entry(movie.title().to_string()).or_insert(row);
    }
    index
}

/// Negative counts mean "nothing"
fn result_limit(k: i64) -> usize {
    usize::try_from(k).unwrap_or(0)
}

fn by_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
