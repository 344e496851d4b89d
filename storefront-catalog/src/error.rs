//! Error types for catalog fetches.

use thiserror::Error;

/// Error type for catalog operations.
///
/// Cache faults never appear here: the cache degrades to a miss on its own
/// and the fetch proceeds against the upstream API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or decode failure talking to the commerce API.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The commerce API answered with a non-success HTTP status.
    #[error("commerce API returned HTTP status {0}")]
    Status(u16),
}
