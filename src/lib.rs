//! intl-lint - find user-visible text that bypasses translation
//!
//! Scans JSX/TSX/JS/TS sources for literal text shown to end users without
//! going through a translation function, optionally restricted to the lines
//! added in a git diff.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, orchestration, report)
//! - `config`: Configuration file loading and parsing
//! - `core`: Stripping, candidate extraction, skip rules and classification
//! - `diff`: Unified diff parsing and `git diff` retrieval
//! - `issues`: Violation types
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod diff;
pub mod issues;
pub mod utils;
