use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::FileError;
use crate::renumber::{RenumberStats, renumber};

/// Result of [`rewrite_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub stats: RenumberStats,
    /// Whether the file content differed and was replaced.
    pub changed: bool,
}

/// Renumber a file and return the new content without touching the file
pub fn renumber_file(path: &Path) -> Result<(Vec<u8>, RenumberStats), FileError> {
    let original = open(path)?;
    let mut out = Vec::new();
    let stats = renumber(BufReader::new(original), &mut out)
        .map_err(|source| renumber_error(path, source))?;
    Ok((out, stats))
}

/// Renumber a file into nowhere, only to learn whether it would change
pub fn check_file(path: &Path) -> Result<RenumberStats, FileError> {
    let original = open(path)?;
    renumber(BufReader::new(original), std::io::sink())
        .map_err(|source| renumber_error(path, source))
}

/// Renumber a file in place.
///
/// The new content goes to a temp file next to the original and replaces it by
/// rename, so the original is either fully replaced or left untouched. Files whose
/// content would not change are not rewritten. Symlinks are followed and the
/// link target is replaced, not the link.
pub fn rewrite_file(path: &Path) -> Result<RewriteOutcome, FileError> {
    let original = open(path)?;
    let target = fs::canonicalize(path).map_err(|source| io_error(path, source))?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir).map_err(|source| io_error(path, source))?;
    let stats = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let stats = renumber(BufReader::new(original), &mut writer)
            .map_err(|source| renumber_error(path, source))?;
        writer.flush().map_err(|source| io_error(path, source))?;
        stats
    };

    if stats.changed == 0 {
        log::debug!("{} already numbered, leaving it alone", path.display());
        return Ok(RewriteOutcome {
            stats,
            changed: false,
        });
    }

    // Keep the original permissions on the replacement.
    let permissions = fs::metadata(&target)
        .map_err(|source| io_error(path, source))?
        .permissions();
    fs::set_permissions(temp.path(), permissions).map_err(|source| io_error(path, source))?;

    temp.persist(&target).map_err(|e| io_error(path, e.error))?;
    log::info!(
        "Rewrote {} ({} of {} lines changed)",
        path.display(),
        stats.changed,
        stats.lines
    );

    Ok(RewriteOutcome {
        stats,
        changed: true,
    })
}

fn open(path: &Path) -> Result<File, FileError> {
    if !path.exists() {
        return Err(FileError::NotFound(path.to_path_buf()));
    }
    File::open(path).map_err(|source| io_error(path, source))
}

fn renumber_error(path: &Path, source: crate::RenumberError) -> FileError {
    FileError::Renumber {
        path: path.to_path_buf(),
        source,
    }
}

fn io_error(path: &Path, source: std::io::Error) -> FileError {
    FileError::Io {
        path: PathBuf::from(path),
        source,
    }
}
