//! Error types for lvc

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lvc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while writing or reading objects
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Object not found: {id} (expected at {})", .path.display())]
    ObjectNotFound { id: String, path: PathBuf },

    #[error("Corrupt compressed stream: {0}")]
    CorruptStream(String),

    #[error("Malformed object header: {0}")]
    MalformedHeader(String),

    #[error("Corrupt object: {0}")]
    CorruptObject(String),

    #[error("Invalid object id: {0:?}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors that mean the stored bytes cannot be trusted
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Error::CorruptStream(_) | Error::MalformedHeader(_) | Error::CorruptObject(_)
        )
    }
}
