//! Ignore directives for intl-lint comments.
//!
//! Supported directives (inside `//` or `/* */` comments):
//! - `intl-lint-ignore-line` - ignore the line carrying the comment
//! - `intl-lint-ignore-next-line` - ignore the following line
//! - `intl-lint-disable` / `intl-lint-enable` - ignore every line in between
//!
//! Directives are read from the original source, since stripping removes
//! comments before candidate extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?://|/\*)\s*(intl-lint-[a-z-]+)").unwrap()
});

/// Parsed intl-lint directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    IgnoreLine,
    IgnoreNextLine,
    Disable,
    Enable,
}

impl Directive {
    /// Parse a directive name. Returns None if not an intl-lint directive.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "intl-lint-ignore-line" => Some(Self::IgnoreLine),
            "intl-lint-ignore-next-line" => Some(Self::IgnoreNextLine),
            "intl-lint-disable" => Some(Self::Disable),
            "intl-lint-enable" => Some(Self::Enable),
            _ => None,
        }
    }
}

/// Range representing ignored lines [start, end] inclusive.
#[derive(Debug, Clone, Copy)]
struct DisabledRange {
    start: usize,
    end: usize, // usize::MAX for open-ended
}

/// Tracks ignored lines for a single file.
#[derive(Debug, Default)]
pub struct IgnoreContext {
    ignored_lines: HashSet<usize>,
    disabled_ranges: Vec<DisabledRange>,
}

impl IgnoreContext {
    /// Check if a 1-based line is ignored.
    pub fn is_ignored(&self, line: usize) -> bool {
        self.ignored_lines.contains(&line)
            || self
                .disabled_ranges
                .iter()
                .any(|r| line >= r.start && line <= r.end)
    }

    /// Build the context by scanning the original (unstripped) source.
    pub fn from_source(source: &str) -> Self {
        let mut ctx = Self::default();
        let mut open_range: Option<usize> = None;

        for (idx, line) in source.lines().enumerate() {
            let line_num = idx + 1;
            for caps in DIRECTIVE_REGEX.captures_iter(line) {
                let Some(directive) = caps.get(1).and_then(|m| Directive::parse(m.as_str()))
                else {
                    continue;
                };
                match directive {
                    Directive::IgnoreLine => {
                        ctx.ignored_lines.insert(line_num);
                    }
                    Directive::IgnoreNextLine => {
                        ctx.ignored_lines.insert(line_num + 1);
                    }
                    Directive::Disable => {
                        // Only start a new range if not already open
                        open_range.get_or_insert(line_num);
                    }
                    Directive::Enable => {
                        if let Some(start) = open_range.take() {
                            ctx.disabled_ranges.push(DisabledRange {
                                start,
                                end: line_num,
                            });
                        }
                    }
                }
            }
        }

        // Close an open range (extend to end of file)
        if let Some(start) = open_range {
            ctx.disabled_ranges.push(DisabledRange {
                start,
                end: usize::MAX,
            });
        }

        ctx
    }
}
