//! Core trait for the preference filtering pipeline.
//!
//! Filters narrow a candidate set of row ids. They are total: a filter never
//! fails, it can only keep fewer rows.

use catalog::{MovieRecord, RowId};

/// Core trait for filtering candidates.
///
/// ## Design Note
/// - `Send + Sync` so a built pipeline can be shared across reader threads
/// - Filters take ownership of the candidate list and return the survivors,
///   preserving their relative order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep the candidates that pass this filter.
    ///
    /// # Arguments
    /// * `candidates` - Row ids still in play (takes ownership)
    /// * `movies` - The catalog the row ids point into
    fn apply(&self, candidates: Vec<RowId>, movies: &[MovieRecord]) -> Vec<RowId>;
}
