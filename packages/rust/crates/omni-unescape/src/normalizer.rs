//! The normalization run: discover, transform, write back, report.
//!
//! Files are handled strictly one at a time in discovery order. A read or
//! write failure on one file is reported and counted, and the run moves on
//! to the next file; the run still exits non-zero at the end.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::NormalizerConfig;
use crate::diff::generate_unified_diff;
use crate::discover::discover_targets;
use crate::error::{Result, UnescapeError};
use crate::io::{LocalTextStore, TextStore};
use crate::rules::transform;

const SEPARATOR_WIDTH: usize = 50;

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Content changed (and was written, unless dry-run).
    Fixed,
    /// Nothing to strip; the file was not touched.
    Unchanged,
}

/// Result of processing one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Fixed or unchanged.
    pub status: FileStatus,
    /// Whether the file was actually rewritten.
    pub written: bool,
    /// Total substitutions made across all rules.
    pub replacements: usize,
    /// Unified diff of the change, when requested and something changed.
    pub diff: Option<String>,
}

impl FileOutcome {
    /// Whether the transform altered the content.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.status == FileStatus::Fixed
    }
}

/// Counters for one run.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    /// Files discovered and attempted
    pub total_files_considered: usize,
    /// Files whose content changed
    pub files_changed: usize,
    /// Files that failed (path -> error message)
    pub files_failed: Vec<(PathBuf, String)>,
}

impl RunSummary {
    /// Files processed without change.
    #[must_use]
    pub fn files_unchanged(&self) -> usize {
        self.total_files_considered
            .saturating_sub(self.files_changed)
            .saturating_sub(self.files_failed.len())
    }

    /// Whether any file failed to read or write.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.files_failed.is_empty()
    }
}

/// Process exit status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// Every discovered file was processed.
    Success,
    /// Missing directory, no matching files, or a per-file failure.
    Failure,
}

impl RunExit {
    /// Numeric exit code (0 or 1).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<RunExit> for ExitCode {
    fn from(exit: RunExit) -> Self {
        ExitCode::from(exit.code())
    }
}

/// Outcome of [`Normalizer::run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Exit status for the process.
    pub exit: RunExit,
    /// Counters, absent when the run stopped before processing any file.
    pub summary: Option<RunSummary>,
}

/// Strips stray backslash escapes from a directory of data files.
#[derive(Debug, Clone, Default)]
pub struct Normalizer<S: TextStore = LocalTextStore> {
    config: NormalizerConfig,
    store: S,
}

impl Normalizer {
    /// Create a normalizer for `config` backed by the local filesystem.
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self::with_store(config, LocalTextStore)
    }
}

impl<S: TextStore> Normalizer<S> {
    /// Create a normalizer that reads and writes through `store`.
    #[must_use]
    pub fn with_store(config: NormalizerConfig, store: S) -> Self {
        Self { config, store }
    }

    /// Files this run would process, in processing order.
    ///
    /// # Errors
    /// - `UnescapeError::DirectoryNotFound` when the target directory is missing.
    /// - `UnescapeError::NoMatchingFiles` when nothing matches the pattern.
    /// - `UnescapeError::InvalidPattern` for a bad glob.
    pub fn targets(&self) -> Result<Vec<PathBuf>> {
        let files = discover_targets(&self.config.target_dir, &self.config.pattern)?;
        if files.is_empty() {
            return Err(UnescapeError::NoMatchingFiles {
                dir: self.config.target_dir.clone(),
                pattern: self.config.pattern.clone(),
            });
        }
        Ok(files)
    }

    /// Read, transform and (if changed) rewrite one file.
    ///
    /// Unchanged files are never written, so their modification time is
    /// preserved. In dry-run mode no file is ever written.
    ///
    /// # Errors
    /// - `UnescapeError::FileRead` when the file cannot be read as UTF-8 text.
    /// - `UnescapeError::FileWrite` when the rewrite fails.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let original = self
            .store
            .read(path, self.config.max_file_size)
            .map_err(|source| UnescapeError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;

        let result = transform(&original);
        tracing::debug!(
            path = %path.display(),
            line_continuations = result.line_continuations,
            escaped_quotes = result.escaped_quotes,
            escaped_brackets = result.escaped_brackets,
            "transformed"
        );

        if !result.changed {
            return Ok(FileOutcome {
                status: FileStatus::Unchanged,
                written: false,
                replacements: 0,
                diff: None,
            });
        }

        let diff = self
            .config
            .show_diff
            .then(|| generate_unified_diff(&display_name(path), &original, &result.text));

        if !self.config.dry_run {
            self.store
                .write(path, &result.text)
                .map_err(|source| UnescapeError::FileWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
        }

        Ok(FileOutcome {
            status: FileStatus::Fixed,
            written: !self.config.dry_run,
            replacements: result.replacements(),
            diff,
        })
    }

    /// Run over every target, writing the report to `out` and errors to `err`.
    ///
    /// # Errors
    /// Only I/O errors from writing the report itself.
    pub fn run<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> std::io::Result<RunReport> {
        tracing::info!(
            dir = %self.config.target_dir.display(),
            pattern = %self.config.pattern,
            dry_run = self.config.dry_run,
            "starting normalization"
        );

        let targets = match self.targets() {
            Ok(targets) => targets,
            Err(e) => {
                writeln!(err, "Error: {e}")?;
                return Ok(RunReport {
                    exit: RunExit::Failure,
                    summary: None,
                });
            }
        };

        let fixed_label = if self.config.dry_run { "Would fix" } else { "Fixed" };

        let mut summary = RunSummary::default();
        for path in &targets {
            summary.total_files_considered += 1;
            let name = display_name(path);

            match self.process_file(path) {
                Ok(outcome) if outcome.changed() => {
                    summary.files_changed += 1;
                    writeln!(out, "{fixed_label}: {name}")?;
                    if let Some(diff) = &outcome.diff {
                        write!(out, "{diff}")?;
                    }
                }
                Ok(_) => writeln!(out, "No changes: {name}")?,
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "file skipped");
                    writeln!(err, "Failed: {e}")?;
                    summary.files_failed.push((path.clone(), e.to_string()));
                }
            }
        }

        writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
        writeln!(
            out,
            "{fixed_label} {}/{} files",
            summary.files_changed, summary.total_files_considered
        )?;

        tracing::info!(
            total = summary.total_files_considered,
            changed = summary.files_changed,
            failed = summary.files_failed.len(),
            "normalization finished"
        );

        let exit = if summary.has_failures() {
            RunExit::Failure
        } else {
            RunExit::Success
        };
        Ok(RunReport {
            exit,
            summary: Some(summary),
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_process_file_fixes_in_place() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("hexagram_01.yaml");
        fs::write(&p, "image: \\[Heaven\\]\n").unwrap();

        let normalizer = Normalizer::new(NormalizerConfig::for_dir(dir.path()));
        let outcome = normalizer.process_file(&p).unwrap();

        assert!(outcome.changed());
        assert!(outcome.written);
        assert_eq!(outcome.replacements, 2);
        assert!(outcome.diff.is_none());
        assert_eq!(fs::read_to_string(&p).unwrap(), "image: [Heaven]\n");
    }

    #[test]
    fn test_process_file_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("hexagram_01.yaml");
        fs::write(&p, "it\\'s\n").unwrap();

        let normalizer = Normalizer::new(NormalizerConfig {
            dry_run: true,
            show_diff: true,
            ..NormalizerConfig::for_dir(dir.path())
        });
        let outcome = normalizer.process_file(&p).unwrap();

        assert!(outcome.changed());
        assert!(!outcome.written);
        assert!(outcome.diff.as_deref().unwrap().contains("\n+it's\n"));
        assert_eq!(fs::read_to_string(&p).unwrap(), "it\\'s\n");
    }

    #[test]
    fn test_process_file_missing() {
        let dir = TempDir::new().unwrap();
        let normalizer = Normalizer::new(NormalizerConfig::for_dir(dir.path()));
        let err = normalizer
            .process_file(&dir.path().join("hexagram_64.yaml"))
            .unwrap_err();
        assert!(matches!(err, UnescapeError::FileRead { .. }));
        assert!(err.is_per_file());
    }

    #[test]
    fn test_targets_no_matches() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        let normalizer = Normalizer::new(NormalizerConfig::for_dir(dir.path()));
        assert!(matches!(
            normalizer.targets(),
            Err(UnescapeError::NoMatchingFiles { .. })
        ));
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            total_files_considered: 5,
            files_changed: 2,
            files_failed: vec![(PathBuf::from("hexagram_03.yaml"), "boom".to_string())],
        };
        assert_eq!(summary.files_unchanged(), 2);
        assert!(summary.has_failures());
    }

    #[test]
    fn test_inconsistent_summary_does_not_underflow() {
        let summary = RunSummary {
            total_files_considered: 1,
            files_changed: 2,
            files_failed: vec![(PathBuf::from("hexagram_04.yaml"), "boom".to_string())],
        };
        assert_eq!(summary.files_unchanged(), 0);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(RunExit::Success.code(), 0);
        assert_eq!(RunExit::Failure.code(), 1);
    }
}
