use anyhow::{Result, anyhow};
use log::trace;
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_parser::{Parser as OxcParser, ParserReturn};
use oxc_span::SourceType;
use std::path::Path;

use crate::types::{ImportStatement, Specifier};

/// Turns source text into a syntax tree allocated in `allocator`.
///
/// The transform never parses on its own; hosts that already own a parser configuration
/// (TypeScript flavour, JSX, ...) implement this to hand it over.
pub trait ParseFunction {
    fn parse<'a>(&self, allocator: &'a Allocator, code: &'a str) -> Result<Program<'a>>;
}

/// [`ParseFunction`] backed by `oxc_parser`. Any reported syntax error fails the parse.
#[derive(Debug, Clone, Copy)]
pub struct OxcParse {
    source_type: SourceType,
}

impl OxcParse {
    pub fn new(source_type: SourceType) -> Self {
        Self { source_type }
    }

    /// Picks TypeScript / JSX support from the file extension.
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        Self::new(source_type_for(path.as_ref()))
    }
}

impl Default for OxcParse {
    fn default() -> Self {
        Self::new(SourceType::mjs())
    }
}

impl ParseFunction for OxcParse {
    fn parse<'a>(&self, allocator: &'a Allocator, code: &'a str) -> Result<Program<'a>> {
        let ParserReturn { program, errors, panicked, .. } =
            OxcParser::new(allocator, code, self.source_type).parse();

        if !errors.is_empty() {
            let messages = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n");
            return Err(anyhow!(messages));
        }
        if panicked {
            return Err(anyhow!("Parser stopped before the end of the input"));
        }
        Ok(program)
    }
}

fn source_type_for(path: &Path) -> SourceType {
    let ext = path.extension().and_then(|e| e.to_str());

    // import declarations only exist in modules, so always parse as one
    SourceType::mjs()
        .with_jsx(matches!(ext, Some("tsx") | Some("jsx") | Some("js") | Some("mjs")))
        .with_typescript(matches!(ext, Some("ts") | Some("tsx") | Some("mts") | Some("cts")))
}

/// Import declarations of the program's top-level statement list.
///
/// Imports cannot appear anywhere else, so nothing below the top level is visited.
pub fn top_level_imports<'p, 'a>(
    program: &'p Program<'a>,
) -> impl Iterator<Item = &'p ImportDeclaration<'a>> {
    program.body.iter().filter_map(|stmt| match stmt {
        Statement::ImportDeclaration(decl) => Some(&**decl),
        _ => None,
    })
}

/// Copies the parts of `decl` the planner needs out of the arena.
pub fn import_statement(decl: &ImportDeclaration<'_>, code: &str) -> ImportStatement {
    let specifiers = decl
        .specifiers
        .as_ref()
        .map(|specifiers| specifiers.iter().map(specifier_from).collect::<Vec<_>>());

    let statement = ImportStatement {
        source: decl.source.value.to_string(),
        specifiers,
        type_only: decl.import_kind.is_type(),
        start: decl.span.start,
        end: decl.span.end,
        line: line_of(code, decl.span.start),
    };
    trace!("Found import of '{}' on line {}", statement.source, statement.line);
    statement
}

fn specifier_from(specifier: &ImportDeclarationSpecifier<'_>) -> Specifier {
    match specifier {
        ImportDeclarationSpecifier::ImportSpecifier(s) => Specifier::Named {
            imported: s.imported.name().to_string(),
            local: s.local.name.to_string(),
            type_only: s.import_kind.is_type(),
        },
        ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
            Specifier::Default { local: s.local.name.to_string() }
        }
        ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
            Specifier::Namespace { local: s.local.name.to_string() }
        }
    }
}

/// 1-based line of byte `offset`.
fn line_of(code: &str, offset: u32) -> usize {
    let end = (offset as usize).min(code.len());
    code.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}
