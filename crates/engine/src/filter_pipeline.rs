//! The FilterPipeline chains preference filters.
//!
//! Filters are ANDed in the order they were added. Once the candidate set is
//! empty the remaining filters are skipped.

use crate::filters::FieldContainsFilter;
use crate::traits::Filter;
use catalog::{MovieRecord, RowId};

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(FieldContainsFilter::genre("action"))
///     .add_filter(FieldContainsFilter::director("nolan"));
///
/// let rows = pipeline.apply((0..movies.len()).collect(), &movies);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Build the pipeline for a set of parsed preferences: one filter per
    /// genre token, then the director, then one per keyword token.
    pub fn from_preferences(preferences: &Preferences) -> Self {
        let mut pipeline = Self::new();
        for genre in &preferences.genres {
            pipeline = pipeline.add_filter(FieldContainsFilter::genre(genre));
        }
        if let Some(director) = &preferences.director {
            pipeline = pipeline.add_filter(FieldContainsFilter::director(director));
        }
        for keyword in &preferences.keywords {
            pipeline = pipeline.add_filter(FieldContainsFilter::keyword(keyword));
        }
        pipeline
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    pub fn apply(&self, candidates: Vec<RowId>, movies: &[MovieRecord]) -> Vec<RowId> {
        let mut current = candidates;
        for filter in &self.filters {
            if current.is_empty() {
                tracing::debug!("Candidate set empty, skipping {}", filter.name());
                break;
            }
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, movies);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-text preference filters, parsed from the raw request strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub genres: Vec<String>,
    pub director: Option<String>,
    pub keywords: Vec<String>,
}

impl Preferences {
    /// `genres` and `keywords` are comma-separated lists; tokens are trimmed
    /// and lower-cased. Empty strings mean "no filter on this field". An empty
    /// token inside a list (`"action,"`) is kept and matches every movie.
    pub fn parse(genres: &str, director: &str, keywords: &str) -> Self {
        Self {
            genres: split_tokens(genres),
            director: (!director.is_empty()).then(|| director.to_lowercase()),
            keywords: split_tokens(keywords),
        }
    }
}

fn split_tokens(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    list.split(',')
        .map(|token| token.trim().to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{DIRECTOR, GENRES, KEYWORDS};

    fn movies() -> Vec<MovieRecord> {
        vec![
            MovieRecord::new()
                .with(GENRES, "Action,Thriller")
                .with(DIRECTOR, "Michael Mann")
                .with(KEYWORDS, "heist,los angeles"),
            MovieRecord::new()
                .with(GENRES, "Action,Comedy")
                .with(DIRECTOR, "Edgar Wright")
                .with(KEYWORDS, "police,village"),
            MovieRecord::new()
                .with(GENRES, "Drama")
                .with(DIRECTOR, "Michael Mann")
                .with(KEYWORDS, "tobacco"),
        ]
    }

    #[test]
    fn test_parse_preferences() {
        let prefs = Preferences::parse(" Action , Sci-Fi", "Nolan", "");
        assert_eq!(prefs.genres, vec!["action", "sci-fi"]);
        assert_eq!(prefs.director.as_deref(), Some("nolan"));
        assert!(prefs.keywords.is_empty());
    }

    #[test]
    fn test_trailing_comma_keeps_empty_token() {
        let prefs = Preferences::parse("action,", "", "");
        assert_eq!(prefs.genres, vec!["action", ""]);

        let pipeline = FilterPipeline::from_preferences(&prefs);
        assert_eq!(pipeline.apply(vec![0, 1, 2], &movies()), vec![0, 1]);
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::from_preferences(&Preferences::default());
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply(vec![0, 1, 2], &movies()), vec![0, 1, 2]);
    }

    #[test]
    fn test_filters_are_anded() {
        let prefs = Preferences::parse("action", "mann", "");
        let pipeline = FilterPipeline::from_preferences(&prefs);

        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.apply(vec![0, 1, 2], &movies()), vec![0]);
    }

    #[test]
    fn test_short_circuits_on_empty() {
        let prefs = Preferences::parse("western", "", "heist,police");
        let pipeline = FilterPipeline::from_preferences(&prefs);
        assert!(pipeline.apply(vec![0, 1, 2], &movies()).is_empty());
    }
}
