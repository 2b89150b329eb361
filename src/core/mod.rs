//! Scanning engine: stripping, extraction, skip rules and classification.
//!
//! Everything here is a pure function of its inputs except `files`, which
//! resolves targets on disk.

pub mod classifier;
pub mod directives;
pub mod extract;
pub mod files;
pub mod parser;
pub mod rules;
pub mod strip;

pub use classifier::{Classifier, ClassifierOptions};
pub use files::{FsSource, SourceProvider, TargetFilter};
