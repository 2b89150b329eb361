//! Candidate extraction from the parsed, stripped source.
//!
//! Walks the module and reports every literal that could surface to an end
//! user, together with enough context (enclosing call, owning attribute,
//! neighbouring text) for the skip rules to decide on it.

use std::ops::Range;
use std::path::Path;

use anyhow::Result;
use swc_common::Span;
use swc_ecma_ast::{
    CallExpr, Callee, Expr, JSXAttr, JSXAttrName, JSXAttrValue, JSXElement, JSXElementName,
    JSXExprContainer, JSXFragment, JSXText, Lit, MemberProp, NewExpr, OptCall, OptChainBase,
    TaggedTpl, Tpl,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::classifier::ClassifierOptions;
use super::parser::{ParsedSource, parse_source};

/// How much neighbouring text is kept on each side of a literal.
const CONTEXT_CHARS: usize = 48;

/// Elements whose children are never user-visible text.
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// Free text between tags, or a literal in a child expression container.
    TextNode,
    /// Value of a user-visible attribute.
    Attribute,
    /// Argument of a flagged notification call.
    FlaggedCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Bare markup text.
    None,
    Quote(char),
    Template,
    Regex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: CandidateKind,
    /// 1-based line of the first non-whitespace character.
    pub line: usize,
    /// Trimmed literal content without its delimiters.
    pub text: String,
    /// `text` with template interpolations replaced by a space.
    pub static_text: String,
    pub delimiter: Delimiter,
    /// Attribute the value is bound to, for `Attribute` candidates.
    pub attribute: Option<String>,
    /// Innermost call the literal is an argument of, e.g. `console.log`.
    pub callee: Option<String>,
    /// Tag of a tagged template literal, e.g. `gql`.
    pub tag: Option<String>,
    /// Text right before the literal, trimmed.
    pub before: String,
    /// Text right after the literal, trimmed.
    pub after: String,
}

impl Candidate {
    /// Last segment of the callee, e.g. `replace` for `value.replace`.
    pub fn callee_method(&self) -> Option<&str> {
        self.callee
            .as_deref()
            .map(|c| c.rsplit('.').next().unwrap_or(c))
    }
}

/// Parse stripped text and extract its candidates, in file order.
///
/// `path` only selects the grammar; the file is not read.
pub fn extract_candidates(
    stripped: &str,
    path: &Path,
    options: &ClassifierOptions,
) -> Result<Vec<Candidate>> {
    let parsed = parse_source(stripped, path)?;
    let mut extractor = Extractor {
        parsed: &parsed,
        source: stripped,
        options,
        scope: Scope::default(),
        candidates: Vec::new(),
    };
    parsed.module.visit_with(&mut extractor);

    let mut candidates = extractor.candidates;
    candidates.sort_by_key(|c| c.line);
    Ok(candidates)
}

/// What a literal in the current expression is part of.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Owner {
    /// Plain script code: only flagged calls count.
    #[default]
    Code,
    Children,
    Attribute(String),
}

#[derive(Debug, Clone, Default)]
struct Scope {
    owner: Owner,
    /// Callees of the calls whose argument lists enclose the cursor.
    calls: Vec<Option<String>>,
}

struct Extractor<'a> {
    parsed: &'a ParsedSource,
    source: &'a str,
    options: &'a ClassifierOptions,
    scope: Scope,
    candidates: Vec<Candidate>,
}

impl Extractor<'_> {
    /// Start a fresh scope; the caller restores the returned one.
    fn enter(&mut self, owner: Owner) -> Scope {
        std::mem::replace(
            &mut self.scope,
            Scope {
                owner,
                calls: Vec::new(),
            },
        )
    }

    fn visit_args(&mut self, callee: Option<String>, args: &impl VisitWith<Self>) {
        self.scope.calls.push(callee);
        args.visit_with(self);
        self.scope.calls.pop();
    }

    /// Record a literal found in expression position. Returns whether the
    /// position is one that reports literals.
    fn literal(
        &mut self,
        span: Span,
        delimiter: Delimiter,
        tag: Option<String>,
        static_text: Option<String>,
    ) -> bool {
        let callee = self.scope.calls.last().cloned().flatten();
        let flagged = callee
            .as_deref()
            .is_some_and(|c| self.options.is_checked_call(c));

        let (kind, attribute) = if flagged {
            (CandidateKind::FlaggedCall, None)
        } else {
            match &self.scope.owner {
                Owner::Children => (CandidateKind::TextNode, None),
                Owner::Attribute(name) if self.options.is_checked_attribute(name) => {
                    (CandidateKind::Attribute, Some(name.clone()))
                }
                _ => return false,
            }
        };

        self.push(
            span,
            delimiter,
            Origin {
                kind,
                attribute,
                callee,
                tag,
            },
            static_text,
        );
        true
    }

    fn template(&mut self, tpl: &Tpl, tag: Option<String>) {
        let static_text = tpl
            .quasis
            .iter()
            .map(|q| q.raw.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        // A reported template is one unit, nested literals included.
        if !self.literal(tpl.span, Delimiter::Template, tag, Some(static_text)) {
            tpl.visit_children_with(self);
        }
    }

    fn quote_of(&self, span: Span) -> Delimiter {
        let start = self.parsed.offset(span.lo);
        match self.source.get(start..).and_then(|s| s.chars().next()) {
            Some(q @ ('"' | '\'')) => Delimiter::Quote(q),
            _ => Delimiter::Quote('"'),
        }
    }

    fn push(
        &mut self,
        span: Span,
        delimiter: Delimiter,
        origin: Origin,
        static_text: Option<String>,
    ) {
        let hi = self.parsed.offset(span.hi).min(self.source.len());
        let lo = self.parsed.offset(span.lo).min(hi);
        let content = content_range(&self.source[lo..hi], lo, delimiter);

        let body = &self.source[content.clone()];
        let text = body.trim();
        if text.is_empty() {
            return;
        }
        let first = content.start + (body.len() - body.trim_start().len());

        self.candidates.push(Candidate {
            kind: origin.kind,
            line: self.parsed.line_at(first),
            text: text.to_string(),
            static_text: static_text.map_or_else(|| text.to_string(), |s| s.trim().to_string()),
            delimiter,
            attribute: origin.attribute,
            callee: origin.callee,
            tag: origin.tag,
            before: last_chars(&self.source[..lo]),
            after: first_chars(&self.source[hi..]),
        });
    }
}

impl Visit for Extractor<'_> {
    fn visit_expr(&mut self, node: &Expr) {
        match node {
            Expr::Lit(Lit::Str(s)) => {
                let delimiter = self.quote_of(s.span);
                self.literal(s.span, delimiter, None, None);
            }
            Expr::Lit(Lit::Regex(r)) => {
                self.literal(r.span, Delimiter::Regex, None, None);
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_tpl(&mut self, node: &Tpl) {
        self.template(node, None);
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        node.tag.visit_with(self);
        self.template(&node.tpl, callee_path(&node.tag));
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        node.callee.visit_with(self);
        let callee = match &node.callee {
            Callee::Expr(expr) => callee_path(expr),
            _ => None,
        };
        self.visit_args(callee, &node.args);
    }

    fn visit_opt_call(&mut self, node: &OptCall) {
        node.callee.visit_with(self);
        self.visit_args(callee_path(&node.callee), &node.args);
    }

    fn visit_new_expr(&mut self, node: &NewExpr) {
        node.callee.visit_with(self);
        let callee = callee_path(&node.callee).map(|c| format!("new {}", c));
        self.visit_args(callee, &node.args);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        let outer = self.enter(Owner::Code);
        node.opening.visit_with(self);

        let is_raw_text = matches!(
            &node.opening.name,
            JSXElementName::Ident(ident) if RAW_TEXT_ELEMENTS.contains(&&*ident.sym)
        );
        if !is_raw_text {
            self.scope.owner = Owner::Children;
            node.children.visit_with(self);
        }
        self.scope = outer;
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        let outer = self.enter(Owner::Children);
        node.children.visit_with(self);
        self.scope = outer;
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        if self.scope.owner == Owner::Children {
            self.push(node.span, Delimiter::None, Origin::text_node(), None);
        }
    }

    fn visit_jsx_expr_container(&mut self, node: &JSXExprContainer) {
        // Code inside {} starts outside any call.
        let outer = self.enter(self.scope.owner.clone());
        node.expr.visit_with(self);
        self.scope = outer;
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let name = match &node.name {
            JSXAttrName::Ident(ident) => ident.sym.to_string(),
            JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
        };

        match &node.value {
            Some(JSXAttrValue::Str(s)) => {
                if self.options.is_checked_attribute(&name) {
                    let delimiter = self.quote_of(s.span);
                    self.push(s.span, delimiter, Origin::attribute(name), None);
                }
            }
            Some(value) => {
                let outer = self.enter(Owner::Attribute(name));
                value.visit_with(self);
                self.scope = outer;
            }
            None => {}
        }
    }
}

/// Where a literal was found, before its text is known.
struct Origin {
    kind: CandidateKind,
    attribute: Option<String>,
    callee: Option<String>,
    tag: Option<String>,
}

impl Origin {
    fn text_node() -> Self {
        Self {
            kind: CandidateKind::TextNode,
            attribute: None,
            callee: None,
            tag: None,
        }
    }

    fn attribute(name: String) -> Self {
        Self {
            kind: CandidateKind::Attribute,
            attribute: Some(name),
            callee: None,
            tag: None,
        }
    }
}

/// Dotted name of a callee or tag, e.g. `toast.error` or `styled.div`.
///
/// A member of something unnamed, such as `dayjs(d).format`, keeps just the
/// member name.
fn callee_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::This(_) => Some("this".to_string()),
        Expr::Member(member) => member_path(&member.obj, &member.prop),
        Expr::OptChain(chain) => match &*chain.base {
            OptChainBase::Member(member) => member_path(&member.obj, &member.prop),
            OptChainBase::Call(_) => None,
        },
        Expr::Paren(paren) => callee_path(&paren.expr),
        Expr::TsNonNull(non_null) => callee_path(&non_null.expr),
        _ => None,
    }
}

fn member_path(obj: &Expr, prop: &MemberProp) -> Option<String> {
    let MemberProp::Ident(name) = prop else {
        return None;
    };
    Some(match callee_path(obj) {
        Some(obj) => format!("{}.{}", obj, name.sym),
        None => name.sym.to_string(),
    })
}

/// Byte range of a literal's content inside its outer span `lo..`.
fn content_range(outer: &str, lo: usize, delimiter: Delimiter) -> Range<usize> {
    let hi = lo + outer.len();
    let (start, end) = match delimiter {
        Delimiter::None | Delimiter::Regex => (lo, hi),
        Delimiter::Quote(q) => {
            let start = lo + usize::from(outer.starts_with(q));
            let closed = outer.len() > 1 && outer.ends_with(q);
            (start, if closed { hi - 1 } else { hi })
        }
        Delimiter::Template => {
            let start = outer.find('`').map_or(lo, |i| lo + i + 1);
            let closed = start < hi && outer.ends_with('`');
            (start, if closed { hi - 1 } else { hi })
        }
    };
    start..end.max(start)
}

fn last_chars(text: &str) -> String {
    let start = text
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map_or(0, |(i, _)| i);
    text[start..].trim().to_string()
}

fn first_chars(text: &str) -> String {
    let end = text
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map_or(text.len(), |(i, _)| i);
    text[..end].trim().to_string()
}
