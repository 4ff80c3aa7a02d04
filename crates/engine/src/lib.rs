//! # Engine Crate
//!
//! Content-based movie recommendations over a loaded catalog.
//!
//! ## Components
//!
//! - **soup**: the per-movie feature string (genres, director, keywords)
//! - **vectorizer**: TF-IDF over all soups, English stop words removed
//! - **similarity**: sparse vectors and the dense cosine similarity matrix
//! - **filters** / **filter_pipeline**: ANDed substring filters for
//!   preference queries
//! - **engine**: `SimilarityEngine`, which ties the above together and
//!   answers queries
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use engine::SimilarityEngine;
//! use std::sync::Arc;
//!
//! let engine = Arc::new(SimilarityEngine::build(Catalog::load("movies.csv".as_ref())));
//!
//! let similar = engine.get_recommendations("The Dark Knight", 5);
//! let picks = engine.get_recommendations_by_preferences("action,crime", "nolan", "", 5);
//! let hits = engine.search_movies("knight");
//! ```
//!
//! Queries never fail. Unknown titles, filters with no match and an empty
//! catalog all come back as empty lists.

pub mod stopwords;
pub mod soup;
pub mod vectorizer;
pub mod similarity;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod engine;

// Re-export main types
pub use engine::{EngineStatus, SimilarityEngine};
pub use filter_pipeline::{FilterPipeline, Preferences};
pub use similarity::{SimilarityMatrix, SparseVector};
pub use soup::{SOUP, create_soup};
pub use traits::Filter;
pub use vectorizer::TfidfVectorizer;
