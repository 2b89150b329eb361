//! Report formatting and printing.
//!
//! Violations go to stdout as `path:line -> "text"`, one group per file.
//! Diff retrieval failures go to stderr.

use std::io::{self, Write};

use colored::Colorize;

use super::run::ScanOutcome;
use crate::issues::FileViolations;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(outcome: &ScanOutcome) {
    print_to(outcome, &mut io::stdout().lock(), &mut io::stderr().lock());
}

/// Print `outcome` to custom writers.
pub fn print_to<W: Write, E: Write>(outcome: &ScanOutcome, out: &mut W, err: &mut E) {
    match outcome {
        ScanOutcome::NoFiles => print_success_to("No files to scan", out),
        ScanOutcome::NoChangedLines => print_success_to("No changed lines to scan", out),
        ScanOutcome::DiffFailed(e) => {
            let _ = writeln!(err, "{} {}", "error:".bold().red(), e);
        }
        ScanOutcome::Clean { files_scanned } => print_success_to(
            &format!(
                "Checked {} source {} - no non-internationalized user-visible text found",
                files_scanned,
                if *files_scanned == 1 { "file" } else { "files" }
            ),
            out,
        ),
        ScanOutcome::Violations { reports, .. } => report_to(reports, out),
    }
}

fn print_success_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}

/// Print grouped violations followed by a summary line.
pub fn report_to<W: Write>(reports: &[FileViolations], writer: &mut W) {
    if reports.is_empty() {
        return;
    }

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(writer);
        }
        for violation in &report.violations {
            let _ = writeln!(
                writer,
                "{}:{} -> \"{}\"",
                report.display_path, violation.line, violation.text
            );
        }
    }

    let total: usize = reports.iter().map(|r| r.violations.len()).sum();
    let summary = format!("{} violation(s) in {} file(s)", total, reports.len());
    let _ = writeln!(writer);
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), summary.red().bold());
}
