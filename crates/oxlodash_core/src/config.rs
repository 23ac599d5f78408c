use serde::{Deserialize, Serialize};

/// Options of a single [`transform`](crate::transform) call.
///
/// Deserializes from the camelCase option objects build tool integrations pass around,
/// with missing keys falling back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
    /// Rewrite to the aggregate `lodash-es` package instead of per-function modules.
    /// Only valid when the output is consumed as ES modules.
    pub use_es_target: bool,
    /// Append `.js` to per-function import paths.
    pub append_extension: bool,
    /// Also rewrite single-function packages such as `lodash.isnil`.
    pub optimize_single_package_imports: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self { use_es_target: false, append_extension: true, optimize_single_package_imports: true }
    }
}
