//! Running `git diff` and turning its output into a [`DiffLineMap`].

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use super::DiffLineMap;
use super::parser::parse_unified_diff;

/// Failure to obtain diff text. Fatal to the scan, never retried.
#[derive(Debug, Error)]
pub enum DiffRetrievalError {
    /// The diff command could not be started.
    #[error("Unable to read git diff: {0}")]
    Spawn(String),
    /// The diff command exited unsuccessfully.
    #[error("Unable to read git diff: {0}")]
    Failed(String),
}

/// Which changes to diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffRequest {
    pub staged: bool,
    pub base: Option<String>,
    pub head: Option<String>,
    pub files: Vec<String>,
}

impl DiffRequest {
    /// Arguments for the `git` invocation, without the program name.
    pub fn git_args(&self) -> Vec<String> {
        let mut args = vec!["diff".to_string(), "-U0".to_string()];
        if self.staged {
            args.push("--cached".to_string());
        }
        if let (Some(base), Some(head)) = (&self.base, &self.head) {
            args.push(format!("{base}...{head}"));
        }
        if !self.files.is_empty() {
            args.push("--".to_string());
            args.extend(self.files.iter().cloned());
        }
        args
    }
}

/// Supplies raw unified diff text.
pub trait DiffSource {
    fn diff_text(&self, request: &DiffRequest) -> Result<String, DiffRetrievalError>;
}

/// `git` on `PATH`, run in `cwd`.
#[derive(Debug, Clone)]
pub struct GitDiff {
    cwd: PathBuf,
}

impl GitDiff {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }
}

impl DiffSource for GitDiff {
    fn diff_text(&self, request: &DiffRequest) -> Result<String, DiffRetrievalError> {
        let output = Command::new("git")
            .current_dir(&self.cwd)
            .args(request.git_args())
            .output()
            .map_err(|e| DiffRetrievalError::Spawn(format!("failed to execute git: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if output.status.success() {
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            let stdout = stdout.trim();
            if stdout.is_empty() {
                format!(
                    "git diff exited with status {}",
                    output.status.code().unwrap_or(-1)
                )
            } else {
                stdout.to_string()
            }
        } else {
            stderr
        };
        Err(DiffRetrievalError::Failed(detail))
    }
}

/// Fetch the diff for `request` and parse it, resolving paths against `cwd`.
///
/// Empty diff output is a valid "no changes" result.
pub fn retrieve_diff_lines(
    source: &dyn DiffSource,
    request: &DiffRequest,
    cwd: &Path,
) -> Result<DiffLineMap, DiffRetrievalError> {
    let text = source.diff_text(request)?;
    Ok(parse_unified_diff(&text, cwd))
}
