//! Error types for the archive crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while reading or writing zip archives.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// A source archive could not be opened or parsed
    #[error("Failed to open zip file: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A destination archive could not be created
    #[error("Failed to create output archive: {path}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An entry could not be read from the source archive
    #[error("Failed to read entry {name}: {source}")]
    ReadEntry {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Sharded output requires at least two destination archives
    #[error("Need at least two output shards, got {0}")]
    NotEnoughShards(usize),

    /// Zip format error
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
