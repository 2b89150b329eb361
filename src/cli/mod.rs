use std::env;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{ConfigLoadResult, load_config};
use crate::core::FsSource;
use crate::diff::GitDiff;

mod args;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, ScanConfig};
pub use exit_status::ExitStatus;
pub use report::{print_to, report_to};
pub use run::{ScanContext, ScanOutcome, scan};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to get current directory")?;
    let ConfigLoadResult { config, path } = load_config(&cwd)?;

    if args.verbose
        && let Some(path) = &path
    {
        eprintln!("{} using config {}", "note:".bold().cyan(), path.display());
    }

    let scan_config = ScanConfig::from(&args);
    let diff = GitDiff::new(&cwd);
    let ctx = ScanContext {
        cwd,
        config,
        verbose: args.verbose,
        sources: &FsSource,
        diff: &diff,
    };

    let outcome = scan(&scan_config, &ctx);
    report::print(&outcome);

    Ok(outcome.exit_status())
}
