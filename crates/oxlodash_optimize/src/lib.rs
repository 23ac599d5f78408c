//! Project-wide lodash import optimization.
//!
//! Walks a JavaScript/TypeScript project, rewrites whole-library lodash imports in every
//! file with [`oxlodash_core`] and reports what changed and what had to be left alone.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use oxlodash_optimize::{Config, print_report, run_optimize};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config::parse_from(["optimize", "--root", "/path/to/project", "--write"]);
//! let result = run_optimize(cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! print_report(&mut stdout, &result)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod cache;
mod collector;
mod config;
mod constants;
mod reporter;
mod runner;
mod types;

// Re-export public API
pub use cache::{CachedTransform, TransformCache};
pub use config::{Config, OutputFormat};
pub use constants::JS_TS_EXTENSIONS;
pub use reporter::{print_json, print_nothing_to_do_message, print_report};
pub use runner::{Optimizer, run_optimize, run_optimize_with};
pub use types::{FileReport, FileStatus, RunResult};
