//! Target file resolution and the file-content seam.

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::config::EXCLUDED_FILE_PATTERNS;
use crate::utils::{display_path, normalize_path};

/// Source extensions the classifier understands.
const SOURCE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Supplies file contents to the classifier.
pub trait SourceProvider: Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl SourceProvider for FsSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}

/// Decides whether a path may be scanned: test/mock exclusions plus the
/// user's `ignores`.
#[derive(Debug, Clone)]
pub struct TargetFilter {
    base: PathBuf,
    literal_ignores: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl TargetFilter {
    /// `ignores` are resolved against `base`. Invalid patterns are reported
    /// and dropped when `verbose`; `Config::validate` normally catches them
    /// first.
    pub fn new(base: &Path, ignores: &[String], verbose: bool) -> Self {
        let mut literal_ignores = Vec::new();
        let mut patterns: Vec<Pattern> = EXCLUDED_FILE_PATTERNS
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();

        for p in ignores {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => patterns.push(pattern),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid ignore pattern '{}': {}",
                                "warning:".bold().yellow(),
                                p,
                                e
                            );
                        }
                    }
                }
            } else {
                literal_ignores.push(normalize_path(base, Path::new(p)));
            }
        }

        Self {
            base: base.to_path_buf(),
            literal_ignores,
            patterns,
        }
    }

    /// Whether `path` (absolute, normalized) is a scannable source file.
    pub fn accepts(&self, path: &Path) -> bool {
        if !is_source_file(path) {
            return false;
        }
        if self.literal_ignores.iter().any(|p| path.starts_with(p)) {
            return false;
        }
        let absolute = path.to_string_lossy().replace('\\', "/");
        let relative = display_path(&self.base, path);
        !self
            .patterns
            .iter()
            .any(|p| p.matches(&absolute) || p.matches(&relative))
    }
}

/// Resolve explicit targets against `base`, in the order given.
///
/// Directories, missing files and filtered paths are dropped; duplicates
/// keep their first position.
pub fn resolve_explicit(
    base: &Path,
    files: &[String],
    filter: &TargetFilter,
    verbose: bool,
) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for file in files {
        let path = normalize_path(base, Path::new(file));
        if path.is_dir() {
            if verbose {
                eprintln!(
                    "{} Skipping directory {}",
                    "warning:".bold().yellow(),
                    display_path(base, &path)
                );
            }
            continue;
        }
        if !path.is_file() || !filter.accepts(&path) {
            continue;
        }
        if seen.insert(path.clone()) {
            targets.push(path);
        }
    }

    targets
}

/// Walk `root` for source files in a stable, sorted order.
///
/// A missing or non-directory root yields no files.
pub fn walk_source_root(root: &Path, filter: &TargetFilter, verbose: bool) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && filter.accepts(path) {
            files.push(path.to_path_buf());
        }
    }
    files
}
