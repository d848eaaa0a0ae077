//! Stop registry error types.

use std::path::PathBuf;

/// Errors that can occur when loading stop reference data.
#[derive(Debug, thiserror::Error)]
pub enum StopError {
    /// Reading a registry file failed
    #[error("failed to read stop file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Registry content could not be decoded
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A registry entry names an invalid airport code
    #[error("invalid airport code in stop registry: {0}")]
    InvalidAirport(String),
}
