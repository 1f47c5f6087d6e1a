//! Error types for the hexagram normalizer.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use std::path::PathBuf;

use thiserror::Error;

/// Failure modes when reading a data file as text.
#[derive(Error, Debug)]
pub enum ReadError {
    /// File exceeds size limit.
    #[error("file too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// File contains binary content (NULL bytes detected).
    #[error("binary file detected")]
    BinaryFile,

    /// Content is not valid UTF-8.
    #[error("invalid UTF-8 at byte {0}")]
    Encoding(usize),

    /// Low-level I/O error from std::io.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Error types for a normalization run.
///
/// The first three variants end the run before any file is touched.
/// `FileRead` and `FileWrite` are scoped to a single file.
#[derive(Error, Debug)]
pub enum UnescapeError {
    /// Target directory does not exist (or is not a directory).
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Directory exists but nothing in it matches the pattern.
    #[error("no files matching '{pattern}' in {}", .dir.display())]
    NoMatchingFiles {
        /// Directory that was scanned.
        dir: PathBuf,
        /// Glob that matched nothing.
        pattern: String,
    },

    /// Filename glob does not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending glob.
        pattern: String,
        /// Underlying globset error.
        #[source]
        source: globset::Error,
    },

    /// File could not be read as UTF-8 text.
    #[error("cannot read {}: {source}", .path.display())]
    FileRead {
        /// File being read.
        path: PathBuf,
        /// Why the read failed.
        #[source]
        source: ReadError,
    },

    /// Rewritten content could not be stored.
    #[error("cannot write {}: {source}", .path.display())]
    FileWrite {
        /// File being rewritten.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl UnescapeError {
    /// Whether this error only affects one file rather than the whole run.
    #[must_use]
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::FileRead { .. } | Self::FileWrite { .. })
    }
}

/// Result alias for normalizer operations.
pub type Result<T> = std::result::Result<T, UnescapeError>;
