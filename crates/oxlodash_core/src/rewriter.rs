use anyhow::{Context, Result};
use log::{debug, trace, warn};
use oxc_allocator::Allocator;

use crate::{
    config::TransformOptions,
    constants::TRIGGER,
    parser::{ParseFunction, import_statement, top_level_imports},
    planner::compute_transform,
    splice::{TransformOutput, apply_edits},
    types::{Edit, RewriteDecision},
};

/// Receives the message of every import that was recognized but left alone.
pub type WarnFunction<'w> = &'w mut dyn FnMut(&str);

pub struct TransformInput<'i> {
    pub code: &'i str,
    /// Used in messages and as the source map's file name, usually the file path.
    pub id: &'i str,
    pub parse: &'i dyn ParseFunction,
    /// Defaults to `log::warn!`.
    pub warn: Option<WarnFunction<'i>>,
    pub options: TransformOptions,
}

/// Rewrites the lodash imports of one module.
///
/// Returns `Ok(None)` when nothing had to change, including files that only produced
/// warnings. Fails only when `parse` fails.
pub fn transform(input: TransformInput<'_>) -> Result<Option<TransformOutput>> {
    let TransformInput { code, id, parse, warn: warn_sink, options } = input;

    // before parsing, check if we can skip the whole file
    if !code.contains(TRIGGER) {
        trace!("No '{}' in {}, skipping", TRIGGER, id);
        return Ok(None);
    }

    let allocator = Allocator::default();
    let program =
        parse.parse(&allocator, code).with_context(|| format!("Failed to parse {id}"))?;

    let mut edits: Vec<Edit> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for decl in top_level_imports(&program) {
        let source = decl.source.value.as_str();
        if !source.starts_with(TRIGGER) {
            continue;
        }

        let statement = import_statement(decl, code);
        match compute_transform(&statement, source, id, &options) {
            RewriteDecision::Skip => {
                trace!("Leaving import of '{}' in {} untouched", source, id);
            }
            RewriteDecision::Warn(message) => warnings.push(message),
            RewriteDecision::Transform(lines) => {
                trace!("Rewriting import of '{}' on line {} of {}", source, statement.line, id);
                edits.push(Edit {
                    start: statement.start,
                    end: statement.end,
                    replacement: lines.join("\n"),
                });
            }
        }
    }

    // emitted in one batch once the whole file has been planned
    match warn_sink {
        Some(sink) => warnings.iter().for_each(|message| sink(message.as_str())),
        None => warnings.iter().for_each(|message| warn!("{message}")),
    }

    if edits.is_empty() {
        debug!("No lodash imports to rewrite in {} ({} warnings)", id, warnings.len());
        return Ok(None);
    }

    debug!("Rewriting {} lodash imports in {}", edits.len(), id);
    Ok(Some(apply_edits(code, id, edits)))
}
