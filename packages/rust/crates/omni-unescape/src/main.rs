//! unescape-hexagrams CLI: strip stray backslash escapes from hexagram data files.
//!
//! With no arguments it rewrites `data/hexagrams/hexagram_*.yaml` under the
//! current directory.
//!
//! Logging: set `RUST_LOG=omni_unescape=debug` to see per-file details on stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use omni_unescape::{
    DEFAULT_MAX_FILE_SIZE, DEFAULT_PATTERN, DEFAULT_TARGET_DIR, Normalizer, NormalizerConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "unescape-hexagrams",
    version,
    about = "Strip stray backslash escapes from hexagram YAML files in place"
)]
struct Cli {
    /// Directory holding the data files (not searched recursively).
    #[arg(long, value_name = "DIR", default_value = DEFAULT_TARGET_DIR)]
    dir: PathBuf,

    /// Filename glob selecting the files to normalize.
    #[arg(long, value_name = "GLOB", default_value = DEFAULT_PATTERN)]
    pattern: String,

    /// Report what would change without writing anything.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print a diff for each file that changes.
    #[arg(long, default_value_t = false)]
    diff: bool,

    /// Skip files larger than this many bytes.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,
}

impl From<Cli> for NormalizerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            target_dir: cli.dir,
            pattern: cli.pattern,
            dry_run: cli.dry_run,
            show_diff: cli.diff,
            max_file_size: cli.max_file_size,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("omni_unescape=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let normalizer = Normalizer::new(cli.into());
    let report = normalizer
        .run(&mut std::io::stdout().lock(), &mut std::io::stderr().lock())
        .context("failed to write run report")?;

    Ok(report.exit.into())
}
