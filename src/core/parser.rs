//! SWC front end shared by the stripper and the extractor.

use std::path::Path;

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, SourceMap, Spanned, comments::SingleThreadedComments};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedSource {
    pub module: Module,
    pub source_map: SourceMap,
    pub comments: SingleThreadedComments,
    /// Position of the first byte of the text in `source_map`.
    pub start: BytePos,
}

impl ParsedSource {
    /// Byte offset into the parsed text.
    pub fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.start.0) as usize
    }

    /// 1-based line of a byte offset into the parsed text.
    pub fn line_at(&self, offset: usize) -> usize {
        let pos = BytePos(self.start.0 + offset as u32);
        self.source_map.lookup_char_pos(pos).line
    }
}

/// Grammar for a file, chosen by extension.
///
/// `.ts` never contains markup, so `<T>expr` is a type assertion there.
/// Anything that is not plain TypeScript or JavaScript parses as TSX.
pub fn syntax_for(path: &Path) -> Syntax {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ts" | "mts" | "cts") => Syntax::Typescript(TsSyntax {
            tsx: false,
            decorators: true,
            ..Default::default()
        }),
        Some("js" | "jsx" | "mjs" | "cjs") => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
    }
}

/// Parse `code` as a module, collecting comments on the side.
pub fn parse_source(code: &str, path: &Path) -> Result<ParsedSource> {
    let source_map = SourceMap::default();
    let source_file =
        source_map.new_source_file(FileName::Real(path.to_path_buf()).into(), code.to_string());

    let comments = SingleThreadedComments::default();
    let mut parser = Parser::new(
        syntax_for(path),
        StringInput::from(&*source_file),
        Some(&comments),
    );
    let module = parser.parse_module().map_err(|e| {
        let line = source_map.lookup_char_pos(e.span().lo).line;
        anyhow!("line {}: {:?}", line, e.kind())
    })?;

    Ok(ParsedSource {
        module,
        start: source_file.start_pos,
        source_map,
        comments,
    })
}
