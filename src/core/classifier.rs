//! Violation classifier: strip, extract, then filter candidates.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use anyhow::Result;

use super::directives::IgnoreContext;
use super::extract::extract_candidates;
use super::rules::{RuleContext, first_match};
use super::strip::strip_source;
use crate::config::Config;
use crate::issues::Violation;

/// Name tables the classifier consults. Owned per classifier, never global.
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    pub checked_attributes: HashSet<String>,
    pub checked_calls: Vec<String>,
    pub translation_functions: Vec<String>,
    pub ignore_texts: HashSet<String>,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ClassifierOptions {
    fn from(config: &Config) -> Self {
        Self {
            checked_attributes: config.checked_attributes.iter().cloned().collect(),
            checked_calls: config.checked_calls.clone(),
            translation_functions: config.translation_functions.clone(),
            ignore_texts: config
                .ignore_texts
                .iter()
                .map(|t| t.trim().to_string())
                .collect(),
        }
    }
}

impl ClassifierOptions {
    pub fn is_checked_attribute(&self, name: &str) -> bool {
        self.checked_attributes.contains(name)
    }

    /// `toast.error` matches `toast.error` and `this.toast.error`.
    pub fn is_checked_call(&self, callee: &str) -> bool {
        self.checked_calls
            .iter()
            .any(|p| callee == p || callee.ends_with(&format!(".{p}")))
    }

    /// A bare name such as `t` also matches member calls ending in it
    /// (`props.t`); dotted names must match exactly.
    pub fn is_translation_call(&self, callee: &str) -> bool {
        let method = callee.rsplit('.').next().unwrap_or(callee);
        self.translation_functions
            .iter()
            .any(|f| callee == f || (!f.contains('.') && method == f))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    options: ClassifierOptions,
}

impl Classifier {
    pub fn new(options: ClassifierOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ClassifierOptions::from(config))
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Classify one file's content. `path` selects the grammar by extension.
    ///
    /// With `line_filter`, only violations on those lines are returned.
    /// Lines are 1-based and refer to `source`, not to the stripped text.
    /// Fails if `source` does not parse.
    pub fn classify(
        &self,
        path: &Path,
        source: &str,
        line_filter: Option<&BTreeSet<usize>>,
    ) -> Result<Vec<Violation>> {
        let stripped = strip_source(source, path)?;
        let ignores = IgnoreContext::from_source(source);
        let ctx = RuleContext { ignores: &ignores };

        let mut violations: Vec<Violation> = extract_candidates(&stripped, path, &self.options)?
            .into_iter()
            .filter(|c| {
                !c.callee
                    .as_deref()
                    .is_some_and(|callee| self.options.is_translation_call(callee))
            })
            .filter(|c| first_match(c, &ctx).is_none())
            .filter(|c| !self.options.ignore_texts.contains(&c.text))
            .filter(|c| line_filter.is_none_or(|lines| lines.contains(&c.line)))
            .map(|c| Violation::new(c.line, c.text))
            .collect();

        violations.sort_by_key(|v| v.line);
        Ok(violations)
    }
}
