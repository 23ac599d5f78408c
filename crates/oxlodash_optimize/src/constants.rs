//! File selection constants.

/// Extensions of files that may contain lodash imports
pub const JS_TS_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Directories never descended into, even when not gitignored
pub(crate) const SKIPPED_DIRS: &[&str] = &[".git", "node_modules"];

/// Suffix of the source map written next to a rewritten file
pub(crate) const SOURCE_MAP_SUFFIX: &str = ".map";
