//! Feed source error types.

use std::path::PathBuf;

/// Errors from a flight feed source.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Reading a feed file failed
    #[error("failed to read feed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Feed content could not be decoded
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
