use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by the image lister.
#[derive(Debug, Error)]
pub enum ListError {
    /// The requested category is not one of the fixed groupings.
    #[error("invalid image category: {0:?}")]
    InvalidCategory(String),

    /// The category directory is absent under the public root.
    #[error("image directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Any other I/O failure while reading the category directory.
    #[error("failed to read image directory {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListError {
    pub(crate) fn read_failure(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadFailure {
            path: path.into(),
            source,
        }
    }

    /// Short message safe to hand back to HTTP clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidCategory(_) => "Invalid type",
            Self::DirectoryNotFound(_) => "Directory not found",
            Self::ReadFailure { .. } => "Failed to read directory",
        }
    }
}
