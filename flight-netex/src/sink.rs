//! Document output.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::netex::PublicationDelivery;
use crate::pipeline::LineDocument;

/// Errors from writing documents.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Receiver of finished documents.
pub trait DocumentSink {
    fn write_line(&self, document: &LineDocument) -> Result<(), SinkError>;
    fn write_common(&self, document: &PublicationDelivery) -> Result<(), SinkError>;
}

/// Writes each document as pretty-printed JSON into one directory.
///
/// Line files are named `<CODESPACE>_<line id>.json`; the common document
/// is `_<codespace>_shared_data.json`. Files are written to a temporary
/// name and renamed, so a failed write never leaves a partial document.
#[derive(Debug, Clone)]
pub struct JsonDirectorySink {
    dir: PathBuf,
    codespace: String,
}

impl JsonDirectorySink {
    /// Create the sink, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>, codespace: impl Into<String>) -> Result<Self, SinkError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| SinkError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            codespace: codespace.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn line_path(&self, line_id: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", self.codespace.to_uppercase(), line_id))
    }

    pub fn common_path(&self) -> PathBuf {
        self.dir
            .join(format!("_{}_shared_data.json", self.codespace.to_lowercase()))
    }

    fn write(&self, path: &Path, document: &PublicationDelivery) -> Result<(), SinkError> {
        let json = serde_json::to_string_pretty(document)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| SinkError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, path).map_err(|source| SinkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "wrote document");
        Ok(())
    }
}

impl DocumentSink for JsonDirectorySink {
    fn write_line(&self, document: &LineDocument) -> Result<(), SinkError> {
        self.write(&self.line_path(&document.line_id), &document.document)
    }

    fn write_common(&self, document: &PublicationDelivery) -> Result<(), SinkError> {
        self.write(&self.common_path(), document)
    }
}
