use anyhow::{Context, Result};
use ignore::{DirEntry, WalkBuilder, overrides::OverrideBuilder};
use log::{debug, trace};
use std::path::{Path, PathBuf};

use crate::constants::{JS_TS_EXTENSIONS, SKIPPED_DIRS};

/// Collects every JS/TS file under `root` that passes the include/exclude globs.
///
/// Globs are matched relative to `root`. With no include globs every file is a candidate.
pub(crate) fn collect_files(
    root: &Path,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    debug!("Walking directory tree from root: {}", root.display());

    let mut overrides = OverrideBuilder::new(root);
    for glob in include {
        overrides.add(glob).with_context(|| format!("Invalid include glob '{glob}'"))?;
    }
    for glob in exclude {
        overrides.add(&format!("!{glob}")).with_context(|| format!("Invalid exclude glob '{glob}'"))?;
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .ignore(true)
        .git_ignore(true)
        .overrides(overrides.build()?)
        .filter_entry(|entry| !is_skipped_dir(entry));

    let mut files = Vec::new();
    for res in builder.build() {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }
        if p.extension().and_then(|e| e.to_str()).is_some_and(|ext| JS_TS_EXTENSIONS.contains(&ext))
        {
            trace!("Collected: {}", p.display());
            files.push(p.to_path_buf());
        }
    }

    // walk order depends on the filesystem
    files.sort();
    debug!("Collected {} files", files.len());
    Ok(files)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|t| t.is_dir())
        && entry.file_name().to_str().is_some_and(|name| SKIPPED_DIRS.contains(&name))
}
