use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use log::{debug, trace};
use oxlodash_core::TransformOptions;
use path_clean::PathClean;
use serde::Serialize;
use std::{env, fmt, path::PathBuf};

/// Module format the rewritten code is eventually bundled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Es,
    Cjs,
    Iife,
    Umd,
    System,
    Amd,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Es => "es",
            OutputFormat::Cjs => "cjs",
            OutputFormat::Iife => "iife",
            OutputFormat::Umd => "umd",
            OutputFormat::System => "system",
            OutputFormat::Amd => "amd",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "optimize")]
#[command(about = "Rewrite whole-library lodash imports into per-function imports")]
pub struct Config {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Only process files matching this glob, relative to the root (repeatable)
    #[arg(long = "include", value_name = "GLOB")]
    pub include: Vec<String>,

    /// Skip files matching this glob, relative to the root (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Rewrite to named imports from lodash-es (requires --format es)
    #[arg(long)]
    pub use_es_target: bool,

    /// Do not append .js to per-function import paths
    #[arg(long)]
    pub no_append_extension: bool,

    /// Leave single-function packages such as lodash.isnil alone
    #[arg(long)]
    pub no_single_package_imports: bool,

    /// Module format of the final bundle
    #[arg(long, value_enum, default_value_t = OutputFormat::Es)]
    pub format: OutputFormat,

    /// Write rewritten files in place (default is a dry run)
    #[arg(long)]
    pub write: bool,

    /// Write a <file>.map source map next to every rewritten file
    #[arg(long)]
    pub source_maps: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Rejects option combinations the rewrite cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.use_es_target && self.format != OutputFormat::Es {
            return Err(anyhow!(
                "--use-es-target requires --format es, but the output format is '{}'",
                self.format
            ));
        }
        if self.source_maps && !self.write {
            debug!("--source-maps has no effect without --write");
        }
        Ok(())
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            use_es_target: self.use_es_target,
            append_extension: !self.no_append_extension,
            optimize_single_package_imports: !self.no_single_package_imports,
        }
    }

    /// Fills in `root` with the normalized given root or the enclosing git root.
    pub(crate) fn resolve_root(&mut self) -> Result<PathBuf> {
        let root = match self.root.take() {
            Some(r) => {
                debug!("Using provided root directory: {:?}", r);
                let r = r.clean();
                r.canonicalize().unwrap_or(r)
            }
            None => {
                debug!("No root provided, searching for git root");
                find_git_root()?
            }
        };
        self.root = Some(root.clone());
        Ok(root)
    }
}

pub(crate) fn find_git_root() -> Result<PathBuf> {
    let mut current_dir = env::current_dir()?;
    trace!("Searching for .git upwards from: {:?}", current_dir);

    loop {
        if current_dir.join(".git").exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(anyhow!("Could not find .git directory in any parent folder")),
        }
    }
}
