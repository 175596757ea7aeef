//! Catalog error types.

use std::path::PathBuf;

/// Errors that can occur when obtaining a station snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog source was unreachable, returned a non-success status,
    /// or sent a body that could not be parsed.
    #[error("catalog fetch failed: {message}")]
    FetchFailure {
        status: Option<u16>,
        message: String,
    },

    /// A local station file could not be read or parsed.
    #[error("failed to load stations from {path}: {message}")]
    Io { path: PathBuf, message: String },
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::FetchFailure {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
