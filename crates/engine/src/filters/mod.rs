//! Filter implementations for preference-based recommendations.

pub mod field_contains;

pub use field_contains::FieldContainsFilter;
