//! Core record types for the movie catalog.
//!
//! A catalog row is not a fixed struct: the source may carry any number of
//! columns beyond the ones the engine reads, and every one of them has to come
//! back out of the API untouched. So a record is an ordered list of
//! `(column, value)` pairs, and values are a small tagged scalar.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

// =============================================================================
// Type Aliases and Column Names
// =============================================================================

/// Position of a record in the catalog (0..N-1, stable for the process lifetime)
pub type RowId = usize;

pub const TITLE: &str = "title";
pub const GENRES: &str = "genres";
pub const DIRECTOR: &str = "director";
pub const KEYWORDS: &str = "keywords";
pub const RATING: &str = "rating";

/// Columns the similarity engine reads. A source without them is unusable.
pub const REQUIRED_COLUMNS: [&str; 5] = [TITLE, GENRES, DIRECTOR, KEYWORDS, RATING];

/// Columns that always stay text, whatever their cells look like.
pub const TEXT_COLUMNS: [&str; 4] = [TITLE, GENRES, DIRECTOR, KEYWORDS];

// =============================================================================
// Field Values
// =============================================================================

/// A single cell of the catalog.
///
/// Serializes untagged, so a record turns into a plain JSON object:
/// `Text` as a string, `Integer`/`Float` as numbers, `Null` as `null`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    /// Borrow the string content, if this is a text cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the cell; integers widen to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(x) => write!(f, "{}", x),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

// =============================================================================
// MovieRecord
// =============================================================================

/// One movie: every column of its source row, in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieRecord {
    fields: Vec<(String, FieldValue)>,
}

impl MovieRecord {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Builder-style insert, mostly handy in tests
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.set(name, value.into());
        self
    }

    /// Look up a column by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Replace the value of `name`, or append the column if it is new
    pub fn set(&mut self, name: &str, value: FieldValue) {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Text content of a column; missing, null and non-text cells read as ""
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_str).unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.text(TITLE)
    }

    pub fn genres(&self) -> &str {
        self.text(GENRES)
    }

    pub fn director(&self) -> &str {
        self.text(DIRECTOR)
    }

    pub fn keywords(&self) -> &str {
        self.text(KEYWORDS)
    }

    /// The `rating` column as a number. A text cell counts when it parses as
    /// one. `None` when missing or not numeric.
    pub fn rating(&self) -> Option<f64> {
        match self.get(RATING)? {
            FieldValue::Text(s) => s.trim().parse().ok().filter(|x: &f64| !x.is_nan()),
            value => value.as_f64(),
        }
    }

    /// All columns in source order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for MovieRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut record = MovieRecord::new();
        for (name, value) in iter {
            record.set(&name, value);
        }
        record
    }
}

impl Serialize for MovieRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MovieRecord {
        MovieRecord::new()
            .with(TITLE, "Alien")
            .with(GENRES, "Horror,Sci-Fi")
            .with(RATING, 8.5)
            .with("year", 1979i64)
    }

    #[test]
    fn test_accessors() {
        let record = sample();
        assert_eq!(record.title(), "Alien");
        assert_eq!(record.genres(), "Horror,Sci-Fi");
        assert_eq!(record.director(), "");
        assert_eq!(record.rating(), Some(8.5));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut record = sample();
        record.set(TITLE, FieldValue::from("Aliens"));

        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec![TITLE, GENRES, RATING, "year"]);
        assert_eq!(record.title(), "Aliens");
    }

    #[test]
    fn test_integer_rating_widens() {
        let record = MovieRecord::new().with(RATING, 7i64);
        assert_eq!(record.rating(), Some(7.0));
    }

    #[test]
    fn test_text_rating_parses_when_numeric() {
        assert_eq!(MovieRecord::new().with(RATING, " 6.4").rating(), Some(6.4));
        assert_eq!(MovieRecord::new().with(RATING, "unrated").rating(), None);
        assert_eq!(MovieRecord::new().with(RATING, "NaN").rating(), None);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let record = sample().with("watched", FieldValue::Null);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Alien","genres":"Horror,Sci-Fi","rating":8.5,"year":1979,"watched":null}"#
        );
    }
}
