//! Ordered skip rules.
//!
//! Each rule is a named predicate over a candidate. Rules run in
//! [`SkipRule::ORDER`]; the first one that matches discards the candidate.
//! A candidate no rule matches is reported.

use std::sync::LazyLock;

use regex::Regex;

use super::directives::IgnoreContext;
use super::extract::{Candidate, CandidateKind, Delimiter};
use crate::utils::contains_alphabetic;

static HTML_ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(?:[A-Za-z]+|#\d+|#x[0-9A-Fa-f]+);").unwrap());

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://|(?:https?|mailto|tel|data|blob):|/|\./|\.\./)")
        .unwrap()
});

static CLASS_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9\-\[\]]{2,}:)*!?-?[a-z][a-z0-9]*(?:[-/][a-z0-9.\[\]#%]+)*$").unwrap()
});

static DATE_GROUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"y{2,4}|Y{2,4}|M{2,4}|D{2}|d{2}|H{2}|h{2}|m{2}|s{2}").unwrap());

static DATE_TOKENS_ONLY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:y{2,4}|Y{2,4}|M{2,4}|D{2}|d{2}|H{2}|h{2}|m{2}|s{2})+$").unwrap()
});

static REGEX_SHAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\^|\\[dDwWsSbB]|\(\?[:=!<]|\[\^?[^\]\s]*[A-Za-z0-9]-[A-Za-z0-9][^\]\s]*\]",
    )
    .unwrap()
});

static THROW_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w$])(?:throw|case)$").unwrap());

static PROPERTY_LOOKUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w$\])]\s*\[$").unwrap());

/// Characters that may appear in a date/time format pattern.
const DATE_FORMAT_CHARS: &str = "yYMDdHhmsSaAZzEeQWwXx0123456789 :/.,-_[]T'";

/// Named `Intl.DateTimeFormat` style values.
const INTL_DATE_KEYWORDS: &[&str] = &[
    "short", "long", "medium", "full", "numeric", "2-digit", "narrow",
];

/// Attributes never shown to an end user.
const NON_VISIBLE_ATTRIBUTES: &[&str] = &[
    "id", "key", "name", "value", "type", "style", "ref", "role", "aria-hidden", "htmlFor", "for",
    "testId", "data-testid", "data-test", "data-cy", "method", "target", "rel", "autoComplete",
    "inputMode", "lang", "dir", "tabIndex", "encType",
];

/// Attributes holding a route or resource path.
const ROUTING_ATTRIBUTES: &[&str] = &["href", "to", "src", "action", "path", "as"];

const CLASS_ATTRIBUTES: &[&str] = &["className", "class"];
/// e.g. `inputClassName`, `wrapperClass`.
const CLASS_ATTRIBUTE_SUFFIXES: &[&str] = &["ClassName", "Class"];
const CLASS_HELPERS: &[&str] = &["cn", "clsx", "classNames", "cx", "twMerge", "cva", "tw"];

const PATTERN_METHODS: &[&str] = &["match", "matchAll", "replace", "replaceAll", "search", "split"];
const REGEX_CONSTRUCTORS: &[&str] = &["RegExp", "new RegExp"];

const LOGGING_CALLS: &[&str] = &[
    "console.log",
    "console.debug",
    "console.info",
    "console.warn",
    "console.error",
    "console.trace",
];
const JSON_CALLS: &[&str] = &["JSON.stringify", "JSON.parse"];
const DATE_METHODS: &[&str] = &[
    "format",
    "formatDate",
    "toLocaleDateString",
    "toLocaleTimeString",
    "toLocaleString",
    "DateTimeFormat",
    "dayjs",
    "moment",
    "strftime",
];
const ARRAY_METHODS: &[&str] = &["includes", "indexOf", "lastIndexOf", "startsWith", "endsWith"];
const QUERY_TAGS: &[&str] = &["gql", "graphql", "sql", "css", "keyframes", "createGlobalStyle"];

/// Per-file information the rules need besides the candidate itself.
pub struct RuleContext<'a> {
    pub ignores: &'a IgnoreContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipRule {
    NoWordCharacters,
    UrlOrPath,
    NonVisibleAttribute,
    ClassName,
    DateFormat,
    RegexPattern,
    ProgrammaticCall,
    IgnoreDirective,
}

impl SkipRule {
    /// Evaluation order. The first matching rule wins.
    pub const ORDER: [SkipRule; 8] = [
        SkipRule::NoWordCharacters,
        SkipRule::UrlOrPath,
        SkipRule::NonVisibleAttribute,
        SkipRule::ClassName,
        SkipRule::DateFormat,
        SkipRule::RegexPattern,
        SkipRule::ProgrammaticCall,
        SkipRule::IgnoreDirective,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SkipRule::NoWordCharacters => "no-word-characters",
            SkipRule::UrlOrPath => "url-or-path",
            SkipRule::NonVisibleAttribute => "non-visible-attribute",
            SkipRule::ClassName => "class-name",
            SkipRule::DateFormat => "date-format",
            SkipRule::RegexPattern => "regex-pattern",
            SkipRule::ProgrammaticCall => "programmatic-call",
            SkipRule::IgnoreDirective => "ignore-directive",
        }
    }

    pub fn matches(self, candidate: &Candidate, ctx: &RuleContext) -> bool {
        match self {
            SkipRule::NoWordCharacters => has_no_word_characters(candidate),
            SkipRule::UrlOrPath => is_url_or_path(&candidate.static_text),
            SkipRule::NonVisibleAttribute => is_non_visible_attribute(candidate),
            SkipRule::ClassName => is_class_name(candidate),
            SkipRule::DateFormat => is_date_format(candidate),
            SkipRule::RegexPattern => is_regex_pattern(candidate),
            SkipRule::ProgrammaticCall => is_programmatic_call(candidate),
            SkipRule::IgnoreDirective => ctx.ignores.is_ignored(candidate.line),
        }
    }
}

/// First rule that discards `candidate`, or `None` if it should be reported.
pub fn first_match(candidate: &Candidate, ctx: &RuleContext) -> Option<SkipRule> {
    SkipRule::ORDER
        .into_iter()
        .find(|rule| rule.matches(candidate, ctx))
}

fn has_no_word_characters(candidate: &Candidate) -> bool {
    !contains_alphabetic(&HTML_ENTITY_REGEX.replace_all(&candidate.static_text, " "))
}

/// URL, path or data URI. Anything with whitespace is prose, not a location.
pub fn is_url_or_path(text: &str) -> bool {
    let text = text.trim();
    !text.contains(char::is_whitespace) && URL_REGEX.is_match(text)
}

fn is_non_visible_attribute(candidate: &Candidate) -> bool {
    if candidate.kind != CandidateKind::Attribute {
        return false;
    }
    let Some(name) = candidate.attribute.as_deref() else {
        return false;
    };
    let is_event_handler = name.len() > 2
        && name.starts_with("on")
        && name[2..].starts_with(|c: char| c.is_ascii_uppercase());

    NON_VISIBLE_ATTRIBUTES.contains(&name)
        || name.starts_with("data-")
        || is_event_handler
        || (ROUTING_ATTRIBUTES.contains(&name) && is_url_or_path(&candidate.static_text))
}

/// Class attributes and class helper arguments are always skipped. The
/// class-list shape only decides for other attribute values; text nodes and
/// flagged calls are prose.
fn is_class_name(candidate: &Candidate) -> bool {
    if candidate
        .callee_method()
        .is_some_and(|c| CLASS_HELPERS.contains(&c))
    {
        return true;
    }
    let Some(attribute) = candidate.attribute.as_deref() else {
        return false;
    };
    CLASS_ATTRIBUTES.contains(&attribute)
        || CLASS_ATTRIBUTE_SUFFIXES.iter().any(|s| attribute.ends_with(s))
        || looks_like_class_list(&candidate.static_text)
}

/// Utility or CSS-module class tokens, e.g. `flex bg-blue-500 text-white`.
///
/// Needs a token with a variant prefix or digit, or at least two dashed
/// tokens. A lone dashed word such as `e-mail` is not enough.
pub fn looks_like_class_list(text: &str) -> bool {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() || !tokens.iter().all(|t| CLASS_TOKEN_REGEX.is_match(t)) {
        return false;
    }
    let strong = tokens
        .iter()
        .any(|t| t.contains(':') || t.contains('[') || t.chars().any(|c| c.is_ascii_digit()));
    let dashed = tokens.iter().filter(|t| t.contains('-') || t.contains('/')).count();
    strong || dashed >= 2
}

fn is_date_format(candidate: &Candidate) -> bool {
    let text = candidate.static_text.trim();
    if INTL_DATE_KEYWORDS.contains(&text) {
        return true;
    }
    if !text.chars().all(|c| DATE_FORMAT_CHARS.contains(c)) || !DATE_GROUP_REGEX.is_match(text) {
        return false;
    }
    let has_separator = text.chars().any(|c| " :/.,-_[]T".contains(c));
    has_separator || DATE_TOKENS_ONLY_REGEX.is_match(text)
}

fn is_regex_pattern(candidate: &Candidate) -> bool {
    if candidate.delimiter == Delimiter::Regex {
        return true;
    }
    if let Some(callee) = candidate.callee.as_deref() {
        if REGEX_CONSTRUCTORS.contains(&callee) {
            return true;
        }
        if callee.contains('.')
            && candidate
                .callee_method()
                .is_some_and(|m| PATTERN_METHODS.contains(&m))
        {
            return true;
        }
    }
    let text = candidate.static_text.trim();
    if REGEX_SHAPE_REGEX.is_match(text) {
        return true;
    }
    let compact = !text.contains(char::is_whitespace);
    let wildcard = text.contains(".*") || text.contains(".+");
    compact && (wildcard || (text.len() > 1 && text.ends_with('$')))
}

fn is_programmatic_call(candidate: &Candidate) -> bool {
    if let Some(tag) = candidate.tag.as_deref()
        && (QUERY_TAGS.contains(&tag) || tag.starts_with("styled."))
    {
        return true;
    }

    if let Some(callee) = candidate.callee.as_deref() {
        let method = candidate.callee_method().unwrap_or(callee);
        let bare = callee.trim_start_matches("new ");
        if LOGGING_CALLS.contains(&callee)
            || JSON_CALLS.contains(&callee)
            || DATE_METHODS.contains(&method)
            || (bare.ends_with("Error") && bare.chars().all(|c| c.is_alphanumeric() || c == '.'))
            || (callee.contains('.') && ARRAY_METHODS.contains(&method))
        {
            return true;
        }
    }

    let before = candidate.before.as_str();
    let after = candidate.after.as_str();
    THROW_REGEX.is_match(before)
        || PROPERTY_LOOKUP_REGEX.is_match(before)
        || ["===", "!==", "==", "!="].iter().any(|op| before.ends_with(op))
        || ["===", "!==", "==", "!="].iter().any(|op| after.starts_with(op))
}
