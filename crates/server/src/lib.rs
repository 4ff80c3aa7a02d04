//! HTTP front end for the movie recommendation engine.
//!
//! Thin plumbing: parameter validation, defaults and JSON serialization.
//! All recommendation semantics live in the `engine` crate.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use routes::create_router;
pub use state::AppState;
