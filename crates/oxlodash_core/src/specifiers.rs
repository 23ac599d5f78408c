//! Shape predicates over the specifier list of one import declaration.

use crate::{constants::CHAIN, types::Specifier};

fn is_plain_named(specifier: &Specifier) -> bool {
    matches!(specifier, Specifier::Named { type_only: false, .. })
}

/// Every specifier is a value `{ name }` / `{ name as alias }` binding.
///
/// `{ default as x }` still counts: it is syntactically named, the planner singles it out
/// with [`find_default_as_named`].
pub fn is_named_only(specifiers: &[Specifier]) -> bool {
    specifiers.iter().all(is_plain_named)
}

pub fn is_single_default(specifiers: &[Specifier]) -> bool {
    matches!(specifiers, [Specifier::Default { .. }])
}

pub fn is_single_namespace(specifiers: &[Specifier]) -> bool {
    matches!(specifiers, [Specifier::Namespace { .. }])
}

/// `import { default as x }`: a default import written in named form.
pub fn find_default_as_named(specifiers: &[Specifier]) -> Option<&Specifier> {
    specifiers
        .iter()
        .find(|s| matches!(s, Specifier::Named { imported, .. } if imported == "default"))
}

/// Splits `import _, { a, b }` into the default binding and the named ones.
pub fn partition_default_import(specifiers: &[Specifier]) -> (Option<&Specifier>, Vec<&Specifier>) {
    let default = specifiers.iter().find(|s| matches!(s, Specifier::Default { .. }));
    let named = specifiers.iter().filter(|s| matches!(s, Specifier::Named { .. })).collect();
    (default, named)
}

/// `import _` or `import _, { a, b }`: the default binding, then only plain value bindings.
///
/// False for `import _, * as lo` and for inline `type` specifiers next to the default.
pub fn is_default_with_named(specifiers: &[Specifier]) -> bool {
    match specifiers {
        [Specifier::Default { .. }, rest @ ..] => rest.iter().all(is_plain_named),
        _ => false,
    }
}

/// Named specifiers other than `{ default as x }`.
pub fn named_excluding_default(specifiers: &[Specifier]) -> Vec<&Specifier> {
    specifiers
        .iter()
        .filter(|s| matches!(s, Specifier::Named { imported, .. } if imported != "default"))
        .collect()
}

/// Does not look at the import source.
pub fn has_chain_import<'s>(specifiers: impl IntoIterator<Item = &'s Specifier>) -> bool {
    specifiers
        .into_iter()
        .any(|s| matches!(s, Specifier::Named { imported, .. } if imported == CHAIN))
}
