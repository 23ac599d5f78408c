use anyhow::{Context, Result, anyhow};
use log::{debug, info, trace, warn};
use oxlodash_core::{OxcParse, TransformInput, TransformOptions, transform};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};

use crate::{
    cache::{CachedTransform, TransformCache},
    collector::collect_files,
    config::Config,
    constants::SOURCE_MAP_SUFFIX,
    types::{FileReport, FileStatus, RunResult},
};

/// Runs the transform over files with fixed options, memoizing per path.
#[derive(Debug)]
pub struct Optimizer {
    options: TransformOptions,
    cache: Arc<TransformCache>,
}

impl Optimizer {
    pub fn new(options: TransformOptions) -> Self {
        Self::with_cache(options, Arc::new(TransformCache::new()))
    }

    /// Shares `cache` with other optimizers, e.g. across repeated runs in one process.
    pub fn with_cache(options: TransformOptions, cache: Arc<TransformCache>) -> Self {
        Self { options, cache }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    pub fn cache(&self) -> &TransformCache {
        &self.cache
    }

    /// Transforms `code` read from `path`. `id` names the file in warnings and the source map.
    ///
    /// Warnings are collected into the result instead of being logged.
    pub fn transform_source(&self, path: &Path, id: &str, code: &str) -> Result<CachedTransform> {
        if let Some(hit) = self.cache.get(path, code, &self.options) {
            trace!("Cache hit for {}", id);
            return Ok(hit);
        }

        let mut warnings = Vec::new();
        let mut collect = |message: &str| warnings.push(message.to_string());
        let output = transform(TransformInput {
            code,
            id,
            parse: &OxcParse::for_path(path),
            warn: Some(&mut collect),
            options: self.options,
        })?;

        let result = match output {
            Some(output) => CachedTransform {
                map: Some(output.map_json()?),
                code: Some(output.code),
                warnings,
            },
            None => CachedTransform { code: None, map: None, warnings },
        };

        self.cache.insert(path.to_path_buf(), code.to_string(), self.options, result.clone());
        Ok(result)
    }
}

/// Optimizes every selected file under the configured root.
pub fn run_optimize(cfg: Config) -> Result<RunResult> {
    let optimizer = Optimizer::new(cfg.transform_options());
    run_optimize_with(cfg, &optimizer)
}

/// Like [`run_optimize`], reusing `optimizer` and its cache.
///
/// The optimizer must have been built from `cfg.transform_options()`.
pub fn run_optimize_with(mut cfg: Config, optimizer: &Optimizer) -> Result<RunResult> {
    info!("Starting lodash import optimization");
    cfg.validate()?;
    if *optimizer.options() != cfg.transform_options() {
        return Err(anyhow!(
            "Optimizer options {:?} do not match the configuration {:?}",
            optimizer.options(),
            cfg.transform_options()
        ));
    }

    let root = cfg.resolve_root()?;
    info!("Using root directory: {}", root.display());

    debug!("Collecting files with include={:?}, exclude={:?}", cfg.include, cfg.exclude);
    let files = collect_files(&root, &cfg.include, &cfg.exclude)?;
    if files.is_empty() {
        warn!("No JavaScript/TypeScript files found under {}", root.display());
        return Err(anyhow!("No JavaScript/TypeScript files found under {}", root.display()));
    }
    info!("Processing {} files in parallel", files.len());

    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| {
            debug!("Thread {:?} processing: {}", thread::current().id(), path.display());
            process_file(optimizer, &cfg, &root, path)
        })
        .filter(FileReport::is_notable)
        .collect();

    let result = RunResult { files: reports, files_analyzed: files.len(), written: cfg.write };
    info!(
        "{} files changed, {} warnings, {} failures",
        result.changed_count(),
        result.warning_count(),
        result.failed_count()
    );
    Ok(result)
}

fn process_file(optimizer: &Optimizer, cfg: &Config, root: &Path, path: &Path) -> FileReport {
    let rel_path = path.strip_prefix(root).unwrap_or(path).to_string_lossy().replace('\\', "/");

    match optimize_file(optimizer, cfg, path, &rel_path) {
        Ok(result) => FileReport {
            status: if result.code.is_some() { FileStatus::Changed } else { FileStatus::Unchanged },
            path: rel_path,
            warnings: result.warnings,
            error: None,
        },
        Err(e) => {
            warn!("Failed to optimize {}: {:#}", rel_path, e);
            FileReport {
                path: rel_path,
                status: FileStatus::Failed,
                warnings: vec![],
                error: Some(format!("{e:#}")),
            }
        }
    }
}

fn optimize_file(
    optimizer: &Optimizer,
    cfg: &Config,
    path: &Path,
    rel_path: &str,
) -> Result<CachedTransform> {
    let code =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let result = optimizer.transform_source(path, rel_path, &code)?;

    if cfg.write
        && let Some(new_code) = &result.code
    {
        let map = result.map.as_deref().filter(|_| cfg.source_maps);
        let contents = match map {
            Some(_) => with_source_map_url(new_code, path),
            None => new_code.clone(),
        };

        debug!("Writing {}", path.display());
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

        if let Some(map) = map {
            let map_path = source_map_path(path);
            trace!("Writing source map {}", map_path.display());
            fs::write(&map_path, map)
                .with_context(|| format!("Failed to write {}", map_path.display()))?;
        }
    }
    Ok(result)
}

/// Appends a `//# sourceMappingURL=` comment naming the sibling map file.
fn with_source_map_url(code: &str, path: &Path) -> String {
    let map_name = source_map_path(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let separator = if code.is_empty() || code.ends_with('\n') { "" } else { "\n" };
    format!("{code}{separator}//# sourceMappingURL={map_name}\n")
}

fn source_map_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(SOURCE_MAP_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn config(root: &Path, args: &[&str]) -> Config {
        let root = root.to_string_lossy().to_string();
        let mut argv = vec!["optimize", "--root", root.as_str()];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.js", "import { isNil, map } from 'lodash';\nisNil(map);\n");
        create_test_file(root, "src/chain.ts", "import { chain } from 'lodash';\n");
        create_test_file(root, "src/plain.ts", "export const answer = 42;\n");
        temp_dir
    }

    #[test]
    fn test_dry_run_reports_without_writing() {
        let temp_dir = project();
        let root = temp_dir.path();
        let result = run_optimize(config(root, &[])).unwrap();

        assert_eq!(result.files_analyzed, 3);
        assert!(!result.written);
        assert_eq!(result.changed_count(), 1);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.failed_count(), 0);

        // unchanged files without warnings are not reported
        let paths: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["src/chain.ts", "src/index.js"]);

        let source = fs::read_to_string(root.join("src/index.js")).unwrap();
        assert!(source.starts_with("import { isNil, map } from 'lodash';"));
    }

    #[test]
    fn test_write_rewrites_files_in_place() {
        let temp_dir = project();
        let root = temp_dir.path();
        let result = run_optimize(config(root, &["--write"])).unwrap();
        assert!(result.written);

        let source = fs::read_to_string(root.join("src/index.js")).unwrap();
        assert_eq!(
            source,
            "import isNil from \"lodash/isNil.js\";\nimport map from \"lodash/map.js\";\nisNil(map);\n"
        );
        assert!(!root.join("src/index.js.map").exists());

        // chain imports are reported but left alone
        let chain = fs::read_to_string(root.join("src/chain.ts")).unwrap();
        assert_eq!(chain, "import { chain } from 'lodash';\n");
    }

    #[test]
    fn test_write_source_maps() {
        let temp_dir = project();
        let root = temp_dir.path();
        run_optimize(config(root, &["--write", "--source-maps"])).unwrap();

        let map = fs::read_to_string(root.join("src/index.js.map")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&map).unwrap();
        assert_eq!(json["version"], 3);
        assert_eq!(json["sources"][0], "src/index.js");
        assert!(!root.join("src/chain.ts.map").exists());

        let source = fs::read_to_string(root.join("src/index.js")).unwrap();
        assert!(source.ends_with("isNil(map);\n//# sourceMappingURL=index.js.map\n"));
        let chain = fs::read_to_string(root.join("src/chain.ts")).unwrap();
        assert!(!chain.contains("sourceMappingURL"));
    }

    #[test]
    fn test_es_target() {
        let temp_dir = project();
        let root = temp_dir.path();
        run_optimize(config(root, &["--write", "--use-es-target"])).unwrap();

        let source = fs::read_to_string(root.join("src/index.js")).unwrap();
        assert!(source.starts_with(
            "import { isNil } from \"lodash-es\";\nimport { map } from \"lodash-es\";\n"
        ));
    }

    #[test]
    fn test_es_target_with_cjs_format_fails() {
        let temp_dir = project();
        let err = run_optimize(config(temp_dir.path(), &["--use-es-target", "--format", "cjs"]))
            .unwrap_err();
        assert!(err.to_string().contains("--use-es-target"));
    }

    #[test]
    fn test_parse_failure_does_not_stop_other_files() {
        let temp_dir = project();
        let root = temp_dir.path();
        create_test_file(root, "src/broken.js", "import { map from 'lodash';\n");

        let result = run_optimize(config(root, &["--write"])).unwrap();
        assert_eq!(result.failed_count(), 1);
        assert_eq!(result.changed_count(), 1);

        let broken = result.files.iter().find(|f| f.path == "src/broken.js").unwrap();
        assert_eq!(broken.status, FileStatus::Failed);
        assert!(broken.error.as_deref().unwrap().contains("Failed to parse src/broken.js"));
    }

    #[test]
    fn test_no_files_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        create_test_file(temp_dir.path(), "README.md", "# nothing here");
        assert!(run_optimize(config(temp_dir.path(), &[])).is_err());
    }

    #[test]
    fn test_exclude_glob() {
        let temp_dir = project();
        let root = temp_dir.path();
        let result = run_optimize(config(root, &["--exclude", "**/index.js"])).unwrap();
        assert_eq!(result.files_analyzed, 2);
        assert_eq!(result.changed_count(), 0);
    }

    #[test]
    fn test_cached_result_is_reused_for_same_input() {
        let optimizer = Optimizer::new(TransformOptions::default());
        let path = Path::new("src/a.js");
        let code = "import { isNil } from 'lodash';";

        // a planted entry proves the second call never reaches the transform
        let planted = CachedTransform { code: Some("planted".into()), map: None, warnings: vec![] };
        optimizer.cache().insert(path.to_path_buf(), code.into(), TransformOptions::default(), planted.clone());
        assert_eq!(optimizer.transform_source(path, "src/a.js", code).unwrap(), planted);

        let other = "import { map } from 'lodash';";
        let fresh = optimizer.transform_source(path, "src/a.js", other).unwrap();
        assert_eq!(fresh.code.as_deref(), Some("import map from \"lodash/map.js\";"));
        assert_eq!(optimizer.cache().len(), 1);
    }

    #[test]
    fn test_unchanged_and_warning_results_are_cached() {
        let optimizer = Optimizer::new(TransformOptions::default());
        let result =
            optimizer.transform_source(Path::new("a.js"), "a.js", "import _ from 'lodash';").unwrap();
        assert_eq!(result.code, None);
        assert_eq!(result.warnings.len(), 1);

        optimizer.transform_source(Path::new("b.js"), "b.js", "const x = 1;").unwrap();
        assert_eq!(optimizer.cache().len(), 2);
    }

    #[test]
    fn test_repeated_runs_share_cache() {
        let temp_dir = project();
        let root = temp_dir.path();
        let cfg = config(root, &[]);
        let optimizer = Optimizer::new(cfg.transform_options());

        let first = run_optimize_with(cfg.clone(), &optimizer).unwrap();
        let second = run_optimize_with(cfg, &optimizer).unwrap();
        assert_eq!(optimizer.cache().len(), 3);
        assert_eq!(first.changed_count(), second.changed_count());
    }

    #[test]
    fn test_optimizer_must_match_config() {
        let temp_dir = project();
        let root = temp_dir.path();
        let es = TransformOptions { use_es_target: true, ..TransformOptions::default() };

        let err = run_optimize_with(config(root, &["--format", "cjs"]), &Optimizer::new(es))
            .unwrap_err();
        assert!(err.to_string().contains("do not match"));

        // nothing was rewritten with the mismatched options
        let source = fs::read_to_string(root.join("src/index.js")).unwrap();
        assert!(source.starts_with("import { isNil, map } from 'lodash';"));
    }

    #[test]
    fn test_source_map_url_comment() {
        let path = Path::new("src/a.ts");
        assert_eq!(with_source_map_url("x;\n", path), "x;\n//# sourceMappingURL=a.ts.map\n");
        assert_eq!(with_source_map_url("x;", path), "x;\n//# sourceMappingURL=a.ts.map\n");
    }

    #[test]
    fn test_source_map_path() {
        assert_eq!(source_map_path(Path::new("src/a.ts")), PathBuf::from("src/a.ts.map"));
    }
}
