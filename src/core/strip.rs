//! Line-preserving comment and module-import stripper.
//!
//! The output always has exactly as many newlines as the input, so a line
//! number computed on stripped text is valid for the original file.
//! Comments are located by the parser, so a `//` inside markup text or a
//! literal is never taken for one.

use std::ops::Range;
use std::path::Path;

use anyhow::Result;
use swc_common::{Span, Spanned, comments::CommentKind};
use swc_ecma_ast::{
    Callee, Decl, ExportDecl, Expr, ImportDecl, ModuleDecl, NamedExport, Stmt, TsImportEqualsDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::parser::{ParsedSource, parse_source};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Erase {
    /// Drop the content; the span never holds a newline.
    Remove,
    /// Replace every character with a space, keeping newlines.
    Blank,
}

/// Strip comments and module import/require statements from `source`.
///
/// Line comments lose their content up to (not including) the newline.
/// Block comments and import statements become whitespace with their
/// embedded newlines kept.
pub fn strip_source(source: &str, path: &Path) -> Result<String> {
    let parsed = parse_source(source, path)?;
    let mut regions = comment_regions(&parsed);
    regions.extend(import_regions(&parsed, source));
    Ok(erase(source, regions))
}

fn comment_regions(parsed: &ParsedSource) -> Vec<(Range<usize>, Erase)> {
    let (leading, trailing) = parsed.comments.borrow_all();
    leading
        .iter()
        .chain(trailing.iter())
        .flat_map(|(_, comments)| comments.iter())
        .map(|comment| {
            let erase = match comment.kind {
                CommentKind::Line => Erase::Remove,
                CommentKind::Block => Erase::Blank,
            };
            (range_of(parsed, comment.span), erase)
        })
        .collect()
}

/// Statement spans, widened over a trailing `;` the span may leave out.
fn import_regions(parsed: &ParsedSource, source: &str) -> Vec<(Range<usize>, Erase)> {
    let mut collector = ImportCollector::default();
    parsed.module.visit_with(&mut collector);
    collector
        .spans
        .into_iter()
        .map(|span| {
            let mut range = range_of(parsed, span);
            if source[range.end.min(source.len())..].starts_with(';') {
                range.end += 1;
            }
            (range, Erase::Blank)
        })
        .collect()
}

fn range_of(parsed: &ParsedSource, span: Span) -> Range<usize> {
    parsed.offset(span.lo)..parsed.offset(span.hi)
}

/// Apply the regions to `source`. Overlapping regions are merged.
fn erase(source: &str, mut regions: Vec<(Range<usize>, Erase)>) -> String {
    regions.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (range, erase) in regions {
        let start = range.start.max(cursor).min(source.len());
        let end = range.end.min(source.len());
        if start >= end {
            continue;
        }
        out.push_str(&source[cursor..start]);
        if erase == Erase::Blank {
            out.extend(
                source[start..end]
                    .chars()
                    .map(|c| if c == '\n' { '\n' } else { ' ' }),
            );
        }
        cursor = end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Collects the spans of whole `import`, `export ... from` and `require`
/// statements.
#[derive(Default)]
struct ImportCollector {
    spans: Vec<Span>,
}

impl Visit for ImportCollector {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        self.spans.push(node.span);
    }

    fn visit_named_export(&mut self, node: &NamedExport) {
        if node.src.is_some() {
            self.spans.push(node.span);
        }
    }

    fn visit_module_decl(&mut self, node: &ModuleDecl) {
        match node {
            ModuleDecl::ExportAll(export) => self.spans.push(export.span),
            ModuleDecl::ExportDecl(ExportDecl {
                decl: Decl::Var(var),
                span,
            }) if var.decls.iter().any(|d| d.init.as_deref().is_some_and(is_require)) => {
                self.spans.push(*span)
            }
            _ => node.visit_children_with(self),
        }
    }

    fn visit_ts_import_equals_decl(&mut self, node: &TsImportEqualsDecl) {
        self.spans.push(node.span);
    }

    fn visit_stmt(&mut self, node: &Stmt) {
        let is_require_stmt = match node {
            Stmt::Decl(Decl::Var(var)) => var
                .decls
                .iter()
                .any(|d| d.init.as_deref().is_some_and(is_require)),
            Stmt::Expr(stmt) => is_require(&stmt.expr),
            _ => false,
        };
        if is_require_stmt {
            self.spans.push(node.span());
        } else {
            node.visit_children_with(self);
        }
    }
}

/// `require("x")`, possibly wrapped as in `require("x").default` or
/// `await require("x")`.
fn is_require(expr: &Expr) -> bool {
    match expr {
        Expr::Call(call) => matches!(
            &call.callee,
            Callee::Expr(callee) if matches!(&**callee, Expr::Ident(id) if id.sym == "require")
        ),
        Expr::Member(member) => is_require(&member.obj),
        Expr::Paren(paren) => is_require(&paren.expr),
        Expr::Await(await_expr) => is_require(&await_expr.arg),
        _ => false,
    }
}
