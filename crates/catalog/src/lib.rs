//! # Catalog Crate
//!
//! Loads the movie dataset (a CSV file) into an ordered, immutable sequence
//! of records. The position of a record is its row id, and everything the
//! similarity engine derives is keyed by it.
//!
//! ## Main Components
//!
//! - **types**: `MovieRecord` and `FieldValue`, an open-ended row model
//! - **parser**: CSV parsing with per-column type inference
//! - **store**: `Catalog`, the load-once store
//! - **error**: Error types for parsing
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load(Path::new("movies.csv"));
//! for movie in catalog.movies() {
//!     println!("{} ({:?})", movie.title(), movie.rating());
//! }
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod store;

pub use error::{CatalogError, Result};
pub use store::Catalog;
pub use types::{
    FieldValue,
    MovieRecord,
    RowId,
    // Column names
    DIRECTOR,
    GENRES,
    KEYWORDS,
    RATING,
    REQUIRED_COLUMNS,
    TITLE,
};
