#![allow(clippy::doc_markdown)]

//! omni-unescape - Hexagram data escape cleanup for Omni DevEnv
//!
//! Rewrites `hexagram_*.yaml` files in place, stripping backslashes left
//! behind by the generator: line continuations, escaped quotes and escaped
//! brackets. Everything else in the file is left byte-for-byte alone.
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-unescape/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── error.rs      # UnescapeError / ReadError enums (thiserror)
//! ├── config.rs     # NormalizerConfig and fixed defaults
//! ├── discover.rs   # Sorted, non-recursive target discovery (globset)
//! ├── rules.rs      # The three substitution rules
//! ├── io.rs         # Safe UTF-8 read, whole-file write-back, TextStore
//! ├── diff.rs       # Diff preview (similar)
//! ├── normalizer.rs # Normalizer: process_file / run
//! └── main.rs       # `unescape-hexagrams` binary
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_unescape::{Normalizer, NormalizerConfig, transform};
//!
//! assert_eq!(transform("it\\'s").text, "it's");
//!
//! let normalizer = Normalizer::new(NormalizerConfig::for_dir("data/hexagrams"));
//! let report = normalizer.run(&mut std::io::stdout(), &mut std::io::stderr())?;
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod config;
mod diff;
mod discover;
mod error;
mod io;
mod normalizer;
mod rules;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use config::{DEFAULT_MAX_FILE_SIZE, DEFAULT_PATTERN, DEFAULT_TARGET_DIR, NormalizerConfig};
pub use discover::discover_targets;
pub use error::{ReadError, Result, UnescapeError};
pub use normalizer::{FileOutcome, FileStatus, Normalizer, RunExit, RunReport, RunSummary};
pub use rules::{Transformed, transform};

// I/O and diff helpers for callers that drive files themselves
pub use diff::generate_unified_diff;
pub use io::{LocalTextStore, TextStore, is_binary, read_text, write_text};
