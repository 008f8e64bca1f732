pub mod classify;
pub mod error;
pub mod format;
pub mod io;
pub mod lines;
pub mod renumber;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use classify::{LineClass, ListLineClassifier};
pub use error::{FileError, IoOrigin, RenumberError};
pub use format::{format_item, write_item};
pub use io::{RewriteOutcome, check_file, renumber_file, rewrite_file};
pub use renumber::{CancelToken, RenumberStats, renumber, renumber_str, renumber_with_cancel};
