//! Rewrites whole-library lodash imports into per-function imports.
//!
//! This crate is the transform engine shared by every integration:
//! - Classifying the specifiers of an import declaration
//! - Deciding whether an import is skipped, warned about or rewritten
//! - Generating `lodash-es` or `lodash/<method>` import lines
//! - Resolving single-function packages such as `lodash.isnil`
//! - Splicing the rewrites into the source and producing a source map
//!
//! # Examples
//!
//! ```
//! use oxlodash_core::{OxcParse, TransformInput, TransformOptions, transform};
//!
//! # fn main() -> anyhow::Result<()> {
//! let output = transform(TransformInput {
//!     code: "import { isNil } from 'lodash';",
//!     id: "src/index.js",
//!     parse: &OxcParse::default(),
//!     warn: None,
//!     options: TransformOptions::default(),
//! })?;
//!
//! assert_eq!(output.unwrap().code, r#"import isNil from "lodash/isNil.js";"#);
//! # Ok(())
//! # }
//! ```

mod config;
mod constants;
mod methods;
mod parser;
mod planner;
mod resolvers;
mod rewriter;
mod specifiers;
mod splice;
mod types;

// Re-export public API
pub use config::TransformOptions;
pub use constants::{CHAIN, LODASH, LODASH_ES, LODASH_FP, METHOD_PACKAGE_PREFIX, TRIGGER};
pub use methods::{LODASH_METHODS, is_method_package, method_for_package};
pub use parser::{OxcParse, ParseFunction, import_statement, top_level_imports};
pub use planner::compute_transform;
pub use resolvers::{specifiers_to_cjs, specifiers_to_es};
pub use rewriter::{TransformInput, WarnFunction, transform};
pub use specifiers::{
    find_default_as_named, has_chain_import, is_default_with_named, is_named_only,
    is_single_default, is_single_namespace, partition_default_import,
};
pub use splice::{TransformOutput, apply_edits};
pub use types::{Edit, ImportStatement, RewriteDecision, Specifier};
