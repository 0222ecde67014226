//! Naimo Tools Library
//!
//! Two small developer utilities: a GitHub branch archive fetcher and a
//! static file server for manual browser testing that adds CORS headers
//! and disables caching.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
