//! Feature soup: the single text blob each movie is vectorized from.
//!
//! Genre tokens, then the director, then keyword tokens, separated by single
//! spaces and lower-cased. Commas in the multi-value fields become spaces, so
//! "sci-fi,action" and "sci-fi action" produce the same soup.

use catalog::MovieRecord;

/// Name of the column the soup is stored under on each record
pub const SOUP: &str = "soup";

/// Build the soup for one movie
pub fn create_soup(movie: &MovieRecord) -> String {
    format!(
        "{} {} {}",
        join_tokens(movie.genres()),
        movie.director().to_lowercase(),
        join_tokens(movie.keywords())
    )
}

/// Lower-case a comma-separated field and re-join its tokens with spaces
fn join_tokens(field: &str) -> String {
    field
        .to_lowercase()
        .split(',')
        .collect::<Vec<_>>()
        .join(" ")
}
