//! Error types for the indexer

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Index error type
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Input not found or unreadable: {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write index to {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Pattern error: {0}")]
    Pattern(String),
}

impl IndexError {
    pub(crate) fn input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IndexError::InputNotFound {
            path: path.into(),
            source,
        }
    }

    /// Path of the input or output file involved, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            IndexError::InputNotFound { path, .. } | IndexError::Output { path, .. } => {
                Some(path.as_path())
            }
            _ => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, IndexError>;
