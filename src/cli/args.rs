//! CLI argument definitions using clap.
//!
//! ```text
//! intl-lint [FILES]... [--diff|--diff-only] [--staged] [--base REF] [--head REF] [-v]
//! ```

use clap::Parser;

use crate::diff::DiffRequest;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Files to scan (default: every source file under the configured source root)
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Only report lines added in the git diff
    #[arg(long, visible_alias = "diff-only")]
    pub diff: bool,

    /// Diff staged changes instead of the working tree (implies --diff)
    #[arg(long)]
    pub staged: bool,

    /// Base ref; combined with --head as `<base>...<head>`
    #[arg(long, value_name = "REF")]
    pub base: Option<String>,

    /// Head ref; combined with --base as `<base>...<head>`
    #[arg(long, value_name = "REF")]
    pub head: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What to scan, independent of how it was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanConfig {
    pub files: Vec<String>,
    pub diff_only: bool,
    pub staged: bool,
    pub base: Option<String>,
    pub head: Option<String>,
}

impl From<&Arguments> for ScanConfig {
    fn from(args: &Arguments) -> Self {
        Self {
            files: args.files.clone(),
            diff_only: args.diff || args.staged,
            staged: args.staged,
            base: args.base.clone(),
            head: args.head.clone(),
        }
    }
}

impl From<&ScanConfig> for DiffRequest {
    fn from(config: &ScanConfig) -> Self {
        Self {
            staged: config.staged,
            base: config.base.clone(),
            head: config.head.clone(),
            files: config.files.clone(),
        }
    }
}
