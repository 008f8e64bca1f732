use std::io;
use std::path::PathBuf;

/// Which side of the stream an I/O failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOrigin {
    Read,
    Write,
}

/// Failure of a renumbering run.
///
/// There is no validation variant: malformed numbering is normalized, never rejected.
#[derive(Debug, thiserror::Error)]
pub enum RenumberError {
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
    #[error("renumbering cancelled")]
    Cancelled,
}

impl RenumberError {
    pub fn origin(&self) -> Option<IoOrigin> {
        match self {
            RenumberError::Read(_) => Some(IoOrigin::Read),
            RenumberError::Write(_) => Some(IoOrigin::Write),
            RenumberError::Cancelled => None,
        }
    }

    /// The underlying transport failure, untouched.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            RenumberError::Read(e) | RenumberError::Write(e) => Some(e),
            RenumberError::Cancelled => None,
        }
    }
}

/// Failure of a file-level helper in [`crate::io`].
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to renumber {path}: {source}")]
    Renumber {
        path: PathBuf,
        source: RenumberError,
    },
    #[error("IO error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}
