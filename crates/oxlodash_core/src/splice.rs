//! Applies edits to the original text and records where every output position came from.

use anyhow::Result;
use sourcemap::{SourceMap, SourceMapBuilder};

use crate::types::Edit;

/// Rewritten code plus a map back to the input.
#[derive(Debug)]
pub struct TransformOutput {
    pub code: String,
    pub map: SourceMap,
}

impl TransformOutput {
    /// Source map v3 JSON.
    pub fn map_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.map.to_writer(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Line/column cursor; columns count UTF-16 code units like JS tooling does.
#[derive(Debug, Clone, Copy, Default)]
struct Position {
    line: u32,
    col: u32,
}

impl Position {
    fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += ch.len_utf16() as u32;
        }
    }
}

struct Splicer<'s> {
    builder: SourceMapBuilder,
    src_id: u32,
    out: String,
    src: Position,
    dst: Position,
    original: &'s str,
}

impl Splicer<'_> {
    fn map(&mut self) {
        self.builder.add_raw(
            self.dst.line,
            self.dst.col,
            self.src.line,
            self.src.col,
            Some(self.src_id),
            None,
            false,
        );
    }

    /// Copies `original[start..end]` verbatim with one mapping per character.
    fn copy(&mut self, start: usize, end: usize) {
        for ch in self.original[start..end].chars() {
            if ch != '\n' {
                self.map();
            }
            self.out.push(ch);
            self.src.advance(ch);
            self.dst.advance(ch);
        }
    }

    /// Writes `replacement` in place of `original[start..end]`, attributing it to `start`.
    fn replace(&mut self, start: usize, end: usize, replacement: &str) {
        if !replacement.is_empty() {
            self.map();
        }
        for ch in replacement.chars() {
            self.out.push(ch);
            self.dst.advance(ch);
        }
        for ch in self.original[start..end].chars() {
            self.src.advance(ch);
        }
    }
}

/// Splices non-overlapping `edits` into `code` in a single pass over the original text.
///
/// The map names `id` as both the generated file and the only source, and embeds `code` as
/// that source's content.
pub fn apply_edits(code: &str, id: &str, mut edits: Vec<Edit>) -> TransformOutput {
    edits.sort_by_key(|edit| edit.start);

    let mut builder = SourceMapBuilder::new(Some(id));
    let src_id = builder.add_source(id);
    builder.set_source_contents(src_id, Some(code));

    let mut splicer = Splicer {
        builder,
        src_id,
        out: String::with_capacity(code.len()),
        src: Position::default(),
        dst: Position::default(),
        original: code,
    };

    let mut cursor = 0;
    for edit in &edits {
        let (start, end) = (edit.start as usize, edit.end as usize);
        debug_assert!(cursor <= start && start <= end, "edits overlap");
        splicer.copy(cursor, start);
        splicer.replace(start, end, &edit.replacement);
        cursor = end;
    }
    splicer.copy(cursor, code.len());

    TransformOutput { code: splicer.out, map: splicer.builder.into_sourcemap() }
}
