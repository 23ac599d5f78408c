/// One binding of an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    /// `import local from "source"`
    Default { local: String },
    /// `import * as local from "source"`
    Namespace { local: String },
    /// `import { imported as local } from "source"`, including `{ default as local }`
    Named { imported: String, local: String, type_only: bool },
}

impl Specifier {
    pub fn named(imported: impl Into<String>, local: impl Into<String>) -> Self {
        Specifier::Named { imported: imported.into(), local: local.into(), type_only: false }
    }

    pub fn local(&self) -> &str {
        match self {
            Specifier::Default { local }
            | Specifier::Namespace { local }
            | Specifier::Named { local, .. } => local,
        }
    }
}

/// A top-level `import ... from "<source>"` declaration, detached from the parser's arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub source: String,
    /// `None` for `import "source"`
    pub specifiers: Option<Vec<Specifier>>,
    /// `import type { .. } from "source"`
    pub type_only: bool,
    pub start: u32,
    pub end: u32,
    /// 1-based
    pub line: usize,
}

impl ImportStatement {
    pub fn specifiers(&self) -> &[Specifier] {
        self.specifiers.as_deref().unwrap_or_default()
    }
}

/// Outcome of planning one import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteDecision {
    Skip,
    Warn(String),
    Transform(Vec<String>),
}

/// A replacement of `start..end` in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: u32,
    pub end: u32,
    pub replacement: String,
}
