use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the library while reading, rewriting or restoring a target file.
#[derive(Error, Debug)]
pub enum FixError {
    /// The target (or its temporary/backup sibling) could not be found, read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    ResourceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `restore` was asked for but no backup exists next to the target.
    #[error("No backup found at {}", .0.display())]
    MissingBackup(PathBuf),

    /// A pattern specification could not be turned into a matcher.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

impl FixError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixError::ResourceIo {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for library operations
pub type FixResult<T> = Result<T, FixError>;
