//! Changed-line discovery from unified diffs.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub mod parser;
pub mod retriever;

pub use parser::parse_unified_diff;
pub use retriever::{DiffRequest, DiffRetrievalError, DiffSource, GitDiff, retrieve_diff_lines};

/// Absolute file path to the 1-based line numbers added in the new revision.
///
/// Only files with at least one hunk on a surviving (non-deleted) target
/// are present.
pub type DiffLineMap = BTreeMap<PathBuf, BTreeSet<usize>>;
