//! Scan orchestration: resolve targets, scope them to the diff, classify.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use super::args::ScanConfig;
use super::exit_status::ExitStatus;
use crate::config::Config;
use crate::core::files::{TargetFilter, resolve_explicit, walk_source_root};
use crate::core::{Classifier, SourceProvider};
use crate::diff::{DiffRequest, DiffRetrievalError, DiffSource, retrieve_diff_lines};
use crate::issues::FileViolations;
use crate::utils::{display_path, normalize_path};

/// Collaborators and settings for one scan.
pub struct ScanContext<'a> {
    pub cwd: PathBuf,
    pub config: Config,
    pub verbose: bool,
    pub sources: &'a dyn SourceProvider,
    pub diff: &'a dyn DiffSource,
}

#[derive(Debug)]
pub enum ScanOutcome {
    NoFiles,
    NoChangedLines,
    DiffFailed(DiffRetrievalError),
    Clean {
        files_scanned: usize,
    },
    Violations {
        reports: Vec<FileViolations>,
        files_scanned: usize,
    },
}

impl ScanOutcome {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            ScanOutcome::NoFiles | ScanOutcome::NoChangedLines | ScanOutcome::Clean { .. } => {
                ExitStatus::Success
            }
            ScanOutcome::DiffFailed(_) | ScanOutcome::Violations { .. } => ExitStatus::Failure,
        }
    }
}

/// A file to classify and, in diff mode, the lines to keep.
type ScanJob = (PathBuf, Option<BTreeSet<usize>>);

pub fn scan(scan_config: &ScanConfig, ctx: &ScanContext) -> ScanOutcome {
    let filter = TargetFilter::new(&ctx.cwd, &ctx.config.ignores, ctx.verbose);
    let explicit = !scan_config.files.is_empty();

    let targets = if explicit {
        resolve_explicit(&ctx.cwd, &scan_config.files, &filter, ctx.verbose)
    } else if scan_config.diff_only {
        Vec::new()
    } else {
        let root = normalize_path(&ctx.cwd, Path::new(&ctx.config.source_root));
        walk_source_root(&root, &filter, ctx.verbose)
    };

    if explicit && targets.is_empty() {
        return ScanOutcome::NoFiles;
    }

    let jobs: Vec<ScanJob> = if scan_config.diff_only {
        let request = DiffRequest::from(scan_config);
        if ctx.verbose {
            eprintln!("{} git {}", "note:".bold().cyan(), request.git_args().join(" "));
        }
        let mut changed = match retrieve_diff_lines(ctx.diff, &request, &ctx.cwd) {
            Ok(map) => map,
            Err(e) => return ScanOutcome::DiffFailed(e),
        };
        if changed.is_empty() {
            return ScanOutcome::NoChangedLines;
        }

        let jobs: Vec<ScanJob> = if explicit {
            targets
                .into_iter()
                .filter_map(|path| {
                    let lines = changed.remove(&path)?;
                    Some((path, Some(lines)))
                })
                .collect()
        } else {
            changed
                .into_iter()
                .filter(|(path, _)| filter.accepts(path))
                .map(|(path, lines)| (path, Some(lines)))
                .collect()
        };
        if jobs.is_empty() {
            return ScanOutcome::NoChangedLines;
        }
        jobs
    } else {
        if targets.is_empty() {
            return ScanOutcome::NoFiles;
        }
        targets.into_iter().map(|path| (path, None)).collect()
    };

    let classifier = Classifier::from_config(&ctx.config);
    let reader = FileReader {
        sources: ctx.sources,
        cwd: &ctx.cwd,
        verbose: ctx.verbose,
    };
    let files_scanned = jobs.len();
    let results: Vec<Result<Option<FileViolations>>> = jobs
        .par_iter()
        .map(|(path, lines)| reader.classify(path, lines.as_ref(), &classifier))
        .collect();

    let mut reports = Vec::new();
    let mut unparsed = 0;
    for result in results {
        match result {
            Ok(Some(report)) => reports.push(report),
            Ok(None) => {}
            Err(_) => unparsed += 1,
        }
    }
    if unparsed > 0 && !ctx.verbose {
        eprintln!(
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            unparsed,
            "-v".cyan()
        );
    }

    if reports.is_empty() {
        ScanOutcome::Clean { files_scanned }
    } else {
        ScanOutcome::Violations {
            reports,
            files_scanned,
        }
    }
}

/// The parts of a [`ScanContext`] shared with the worker threads.
struct FileReader<'a> {
    sources: &'a dyn SourceProvider,
    cwd: &'a Path,
    verbose: bool,
}

impl FileReader<'_> {
    /// Unreadable files count as clean. Files that do not parse are an
    /// error, counted by the caller.
    fn classify(
        &self,
        path: &Path,
        lines: Option<&BTreeSet<usize>>,
        classifier: &Classifier,
    ) -> Result<Option<FileViolations>> {
        let source = match self.sources.read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                if self.verbose {
                    eprintln!(
                        "{} Cannot read {}: {}",
                        "warning:".bold().yellow(),
                        display_path(self.cwd, path),
                        e
                    );
                }
                return Ok(None);
            }
        };

        let violations = classifier.classify(path, &source, lines).inspect_err(|e| {
            if self.verbose {
                eprintln!(
                    "{} Cannot parse {}: {:#}",
                    "warning:".bold().yellow(),
                    display_path(self.cwd, path),
                    e
                );
            }
        })?;
        if violations.is_empty() {
            return Ok(None);
        }
        Ok(Some(FileViolations {
            path: path.to_path_buf(),
            display_path: display_path(self.cwd, path),
            violations,
        }))
    }
}
