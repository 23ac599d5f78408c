//! Package names and literals the transform keys on.

/// Substring that must appear in a file before it is worth parsing.
pub const TRIGGER: &str = "lodash";

pub const LODASH: &str = "lodash";
pub const LODASH_FP: &str = "lodash/fp";

/// Tree-shakeable aggregate package.
pub const LODASH_ES: &str = "lodash-es";

/// Prefix of the single-function packages, e.g. `lodash.isnil`.
pub const METHOD_PACKAGE_PREFIX: &str = "lodash.";

/// The fluent wrapper entry point; needs the whole library.
pub const CHAIN: &str = "chain";

/// Extension appended to per-function import paths.
pub const CJS_EXTENSION: &str = ".js";

pub(crate) const TOOL_NAME: &str = "oxlodash";

/// Name of the aggregate package matching `base` (`lodash` or `lodash/fp`).
pub fn es_package_for(base: &str) -> &'static str {
    if is_fp(base) { "lodash-es/fp" } else { LODASH_ES }
}

pub fn is_fp(base: &str) -> bool {
    base.ends_with("fp")
}
