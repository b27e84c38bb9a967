#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("invalid row {row} in {path}: {message}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        message: String,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_row(path: impl Into<PathBuf>, row: usize, message: impl Into<String>) -> Self {
        Self::InvalidRow {
            path: path.into(),
            row,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
