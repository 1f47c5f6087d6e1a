//! Run configuration.

use std::path::PathBuf;

/// Directory scanned when no override is given.
pub const DEFAULT_TARGET_DIR: &str = "data/hexagrams";

/// Filename glob for hexagram data files.
pub const DEFAULT_PATTERN: &str = "hexagram_*.yaml";

/// Largest file the normalizer will read (1MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Configuration for a normalization run.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Directory holding the data files (not searched recursively)
    pub target_dir: PathBuf,
    /// Filename glob (e.g., "hexagram_*.yaml")
    pub pattern: String,
    /// Report what would change without writing anything
    pub dry_run: bool,
    /// Print a unified diff for every file that changes
    pub show_diff: bool,
    /// Maximum file size in bytes
    pub max_file_size: u64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            pattern: DEFAULT_PATTERN.to_string(),
            dry_run: false,
            show_diff: false,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl NormalizerConfig {
    /// Config targeting `dir` with every other setting at its default.
    #[must_use]
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: dir.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_layout() {
        let config = NormalizerConfig::default();
        assert_eq!(config.target_dir, PathBuf::from("data/hexagrams"));
        assert_eq!(config.pattern, "hexagram_*.yaml");
        assert!(!config.dry_run);
        assert!(!config.show_diff);
    }

    #[test]
    fn test_for_dir_keeps_other_defaults() {
        let config = NormalizerConfig::for_dir("/tmp/elsewhere");
        assert_eq!(config.target_dir, PathBuf::from("/tmp/elsewhere"));
        assert_eq!(config.pattern, DEFAULT_PATTERN);
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }
}
