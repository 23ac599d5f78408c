//! Code generation for narrowed imports.
//!
//! Both resolvers take `lodash` or `lodash/fp` as `base` and emit one import line per
//! specifier, in input order. Non-named specifiers are filtered out by the planner before
//! reaching this point and are ignored here.

use oxc_syntax::identifier::is_identifier_name;

use crate::{
    constants::{CJS_EXTENSION, es_package_for},
    types::Specifier,
};

fn named_pairs<'s>(
    specifiers: impl IntoIterator<Item = &'s Specifier>,
) -> impl Iterator<Item = (&'s str, &'s str)> {
    specifiers.into_iter().filter_map(|s| match s {
        Specifier::Named { imported, local, .. } => Some((imported.as_str(), local.as_str())),
        _ => None,
    })
}

fn export_name(imported: &str) -> String {
    if is_identifier_name(imported) { imported.to_string() } else { format!("{imported:?}") }
}

/// `import { isNil } from "lodash";` -> `import { isNil } from "lodash-es";`
///
/// `lodash-es` cannot be consumed from CommonJS; the caller is responsible for an ES output.
pub fn specifiers_to_es<'s>(
    base: &str,
    specifiers: impl IntoIterator<Item = &'s Specifier>,
) -> Vec<String> {
    let package = es_package_for(base);
    named_pairs(specifiers)
        .map(|(imported, local)| {
            if imported != local {
                format!("import {{ {} as {local} }} from \"{package}\";", export_name(imported))
            } else {
                format!("import {{ {local} }} from \"{package}\";")
            }
        })
        .collect()
}

/// `import { isNil as nil } from "lodash";` -> `import nil from "lodash/isNil.js";`
pub fn specifiers_to_cjs<'s>(
    base: &str,
    specifiers: impl IntoIterator<Item = &'s Specifier>,
    append_extension: bool,
) -> Vec<String> {
    let extension = if append_extension { CJS_EXTENSION } else { "" };
    named_pairs(specifiers)
        .map(|(imported, local)| format!("import {local} from \"{base}/{imported}{extension}\";"))
        .collect()
}
