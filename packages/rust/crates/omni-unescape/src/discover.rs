//! Target discovery.
//!
//! Lists the files directly inside one directory whose names match a glob.
//! Nothing below the top level is visited.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{ReadError, Result, UnescapeError};

/// Compile a filename glob. `*` never crosses a path separator.
pub(crate) fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| UnescapeError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Discover the files in `dir` whose names match `pattern`.
///
/// Results are sorted lexicographically by name (`hexagram_10.yaml` sorts
/// before `hexagram_2.yaml`). An empty result is not an error here; the
/// caller decides what "no matches" means.
///
/// # Errors
/// - `UnescapeError::DirectoryNotFound` when `dir` is missing or not a directory.
/// - `UnescapeError::InvalidPattern` when the glob does not compile.
pub fn discover_targets(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(UnescapeError::DirectoryNotFound(dir.to_path_buf()));
    }

    let matcher = compile_pattern(pattern)?;

    let entries = fs::read_dir(dir).map_err(|e| UnescapeError::FileRead {
        path: dir.to_path_buf(),
        source: ReadError::Io(e),
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry_path(dir, entry))
        .filter(|path| path.is_file())
        .filter(|path| path.file_name().is_some_and(|name| matcher.is_match(name)))
        .collect();

    files.sort();
    tracing::debug!(dir = %dir.display(), pattern, count = files.len(), "discovered targets");
    Ok(files)
}

/// Path of a listed entry; unreadable entries are logged and dropped.
fn entry_path(dir: &Path, entry: std::io::Result<fs::DirEntry>) -> Option<PathBuf> {
    match entry {
        Ok(entry) => Some(entry.path()),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "unreadable directory entry skipped");
            None
        }
    }
}
