//! Violation types produced by a scan.

use std::path::PathBuf;

/// A user-visible text span that bypasses the translation layer.
///
/// `line` is 1-based and refers to the original, unstripped file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    pub line: usize,
    /// Verbatim trimmed text. Template literals keep their interpolations.
    pub text: String,
}

impl Violation {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

/// All violations found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileViolations {
    pub path: PathBuf,
    /// Path relative to the working directory, with forward slashes.
    pub display_path: String,
    pub violations: Vec<Violation>,
}
