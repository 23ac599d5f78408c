use log::trace;

use crate::{
    config::TransformOptions,
    constants::{CHAIN, LODASH, LODASH_FP, TOOL_NAME, es_package_for},
    methods::{is_method_package, method_for_package},
    resolvers::{specifiers_to_cjs, specifiers_to_es},
    specifiers::{
        find_default_as_named, has_chain_import, is_default_with_named, is_named_only,
        is_single_default, is_single_namespace, named_excluding_default, partition_default_import,
    },
    types::{ImportStatement, RewriteDecision, Specifier},
};

fn cannot_optimize(kind: &str, id: &str, line: usize) -> RewriteDecision {
    RewriteDecision::Warn(format!(
        "Detected {kind} lodash or lodash/fp import within {id} on line {line}.\nThis import cannot be optimized by {TOOL_NAME}."
    ))
}

fn chain_warning(id: &str, line: usize) -> RewriteDecision {
    RewriteDecision::Warn(format!(
        "Detected an import of chain() from lodash within {id} on line {line}.\nchain() is incompatible with {TOOL_NAME}."
    ))
}

fn namespace_line(local: &str, base: &str) -> String {
    format!("import * as {local} from \"{}\";", es_package_for(base))
}

/// `import * as <alias>` followed by one ES import per remaining named binding.
fn namespace_with_named(alias: &str, base: &str, named: Vec<&Specifier>) -> RewriteDecision {
    let mut lines = vec![namespace_line(alias, base)];
    lines.extend(specifiers_to_es(base, named));
    RewriteDecision::Transform(lines)
}

fn codegen<'s>(
    base: &str,
    specifiers: impl IntoIterator<Item = &'s Specifier>,
    options: &TransformOptions,
) -> RewriteDecision {
    RewriteDecision::Transform(if options.use_es_target {
        specifiers_to_es(base, specifiers)
    } else {
        specifiers_to_cjs(base, specifiers, options.append_extension)
    })
}

/// Decides what to do with one import declaration whose source is `source`.
///
/// Rules are checked in order and the first match wins. Warnings leave the statement as is;
/// only [`RewriteDecision::Transform`] results in an edit.
pub fn compute_transform(
    statement: &ImportStatement,
    source: &str,
    id: &str,
    options: &TransformOptions,
) -> RewriteDecision {
    let line = statement.line;
    let specifiers = statement.specifiers();

    if statement.type_only {
        trace!("Skipping type-only import of '{}' in {}", source, id);
        return RewriteDecision::Skip;
    }

    // lodash.<method> packages, e.g. `import isNil from "lodash.isnil"`
    if options.optimize_single_package_imports && is_method_package(source) {
        let Some(method) = method_for_package(source) else {
            return RewriteDecision::Warn(format!(
                "Detected an import from unknown lodash method package \"{source}\" within {id} on line {line}.\nThis package is not recognized and will not be optimized."
            ));
        };

        if !is_single_default(specifiers) {
            return RewriteDecision::Warn(format!(
                "Detected an unexpected import style from {source} within {id} on line {line}.\nExpected a default import like: import {method} from \"{source}\";"
            ));
        }
        // `lodash.chain` resolves, but chain() still needs the whole library
        if method == CHAIN {
            return chain_warning(id, line);
        }

        let synthetic = Specifier::named(method, specifiers[0].local());
        return codegen(LODASH, [&synthetic], options);
    }

    if source != LODASH && source != LODASH_FP {
        return RewriteDecision::Skip;
    }
    let base = source;

    // `import "lodash"` and `import {} from "lodash"` bind nothing
    if specifiers.is_empty() {
        trace!("Skipping import without bindings of '{}' in {}", source, id);
        return RewriteDecision::Skip;
    }

    // `import _ from "lodash"` / `import _, { isNil } from "lodash"`
    if let (Some(Specifier::Default { local }), named) = partition_default_import(specifiers) {
        // `import _, * as lo` and `import _, { type T }` have bindings the rewrite cannot carry
        if !is_default_with_named(specifiers) {
            return cannot_optimize("an unsupported", id, line);
        }
        if !options.use_es_target {
            return cannot_optimize("a default", id, line);
        }
        if has_chain_import(named.iter().copied()) {
            return chain_warning(id, line);
        }
        return namespace_with_named(local, base, named);
    }

    // `import * as _ from "lodash"`
    if is_single_namespace(specifiers) {
        if !options.use_es_target {
            return cannot_optimize("a namespace", id, line);
        }
        return RewriteDecision::Transform(vec![namespace_line(specifiers[0].local(), base)]);
    }

    if !is_named_only(specifiers) {
        return cannot_optimize("an unsupported", id, line);
    }

    // `import { default as _, isNil } from "lodash"`
    if let Some(default_as_named) = find_default_as_named(specifiers) {
        if !options.use_es_target {
            return cannot_optimize("a default", id, line);
        }
        let others = named_excluding_default(specifiers);
        if has_chain_import(others.iter().copied()) {
            return chain_warning(id, line);
        }
        return namespace_with_named(default_as_named.local(), base, others);
    }

    if has_chain_import(specifiers) {
        return chain_warning(id, line);
    }

    codegen(base, specifiers, options)
}
