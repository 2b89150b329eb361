//! Unified diff parsing.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::DiffLineMap;
use crate::utils::normalize_path;

static HUNK_HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap());

const NULL_DEVICE: &str = "/dev/null";

/// Position inside the diff while scanning it line by line.
#[derive(Debug, Default)]
struct HunkCursor {
    /// Target file of the current section, `None` when deleted or unknown.
    current_file: Option<PathBuf>,
    new_line: usize,
    old_remaining: usize,
    new_remaining: usize,
}

impl HunkCursor {
    fn in_hunk(&self) -> bool {
        self.old_remaining > 0 || self.new_remaining > 0
    }

    fn reset(&mut self, file: Option<PathBuf>) {
        *self = Self {
            current_file: file,
            ..Self::default()
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HunkHeader {
    old_count: usize,
    new_start: usize,
    new_count: usize,
}

fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let caps = HUNK_HEADER_REGEX.captures(line)?;
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<usize>().ok());
    Some(HunkHeader {
        old_count: caps.get(2).map_or(Some(1), |m| m.as_str().parse().ok())?,
        new_start: number(3)?,
        new_count: caps.get(4).map_or(Some(1), |m| m.as_str().parse().ok())?,
    })
}

/// New-side path of a `diff --git a/X b/X` header.
fn parse_diff_git_line(rest: &str) -> Option<&str> {
    let idx = rest.rfind(" b/")?;
    Some(&rest[idx + 3..])
}

/// Path of a `+++ b/X` marker, `None` for the null device.
fn parse_target_marker(rest: &str) -> Option<&str> {
    let rest = rest.split('\t').next().unwrap_or(rest).trim_end();
    if rest == NULL_DEVICE {
        return None;
    }
    Some(rest.strip_prefix("b/").unwrap_or(rest))
}

/// Parse `diff_text` into added line numbers per file.
///
/// Paths are resolved against `cwd`. Malformed hunk headers are skipped
/// together with their body; parsing resumes at the next header.
pub fn parse_unified_diff(diff_text: &str, cwd: &Path) -> DiffLineMap {
    let mut map = DiffLineMap::new();
    let mut cursor = HunkCursor::default();

    for line in diff_text.lines() {
        if cursor.in_hunk() {
            match line.as_bytes().first() {
                Some(b'+') => {
                    if let Some(file) = &cursor.current_file {
                        map.entry(file.clone()).or_default().insert(cursor.new_line);
                    }
                    cursor.new_line += 1;
                    cursor.new_remaining = cursor.new_remaining.saturating_sub(1);
                    continue;
                }
                Some(b'-') => {
                    cursor.old_remaining = cursor.old_remaining.saturating_sub(1);
                    continue;
                }
                Some(b' ') | None => {
                    cursor.new_line += 1;
                    cursor.old_remaining = cursor.old_remaining.saturating_sub(1);
                    cursor.new_remaining = cursor.new_remaining.saturating_sub(1);
                    continue;
                }
                // "\ No newline at end of file"
                Some(b'\\') => continue,
                _ => {
                    cursor.old_remaining = 0;
                    cursor.new_remaining = 0;
                }
            }
        }

        if let Some(rest) = line.strip_prefix("diff --git ") {
            let file = parse_diff_git_line(rest).map(|p| normalize_path(cwd, Path::new(p)));
            cursor.reset(file);
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            cursor.current_file =
                parse_target_marker(rest).map(|p| normalize_path(cwd, Path::new(p)));
        } else if line.starts_with("@@") {
            match parse_hunk_header(line) {
                Some(header) => {
                    if let Some(file) = &cursor.current_file {
                        map.entry(file.clone()).or_default();
                    }
                    cursor.new_line = header.new_start;
                    cursor.old_remaining = header.old_count;
                    cursor.new_remaining = header.new_count;
                }
                None => {
                    cursor.old_remaining = 0;
                    cursor.new_remaining = 0;
                }
            }
        }
    }

    map
}
