use dashmap::DashMap;
use log::trace;
use oxlodash_core::TransformOptions;
use std::path::{Path, PathBuf};

/// Result of transforming one file, in a form that can be written out again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CachedTransform {
    /// Rewritten code, `None` when nothing changed.
    pub code: Option<String>,
    /// Source map JSON for `code`.
    pub map: Option<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug)]
struct CacheEntry {
    input: String,
    options: TransformOptions,
    result: CachedTransform,
}

/// Per-path memo of transform results, shared across worker threads.
///
/// An entry is only reused when both the input text and the options are identical to the
/// ones it was computed from. Unchanged results are cached as well.
#[derive(Debug, Default)]
pub struct TransformCache {
    entries: DashMap<PathBuf, CacheEntry>,
}

impl TransformCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        path: &Path,
        input: &str,
        options: &TransformOptions,
    ) -> Option<CachedTransform> {
        let entry = self.entries.get(path)?;
        if entry.input != input || entry.options != *options {
            trace!("Stale cache entry for {}", path.display());
            return None;
        }
        Some(entry.result.clone())
    }

    pub fn insert(
        &self,
        path: PathBuf,
        input: String,
        options: TransformOptions,
        result: CachedTransform,
    ) {
        self.entries.insert(path, CacheEntry { input, options, result });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
