use serde::Serialize;

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Nothing to rewrite.
    Unchanged,
    /// At least one import was rewritten (and written to disk with `--write`).
    Changed,
    /// The file could not be read, parsed or written.
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path relative to the root.
    pub path: String,
    pub status: FileStatus,
    /// Imports that were left alone, with the reason.
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// Whether the report has anything worth printing.
    pub fn is_notable(&self) -> bool {
        self.status != FileStatus::Unchanged || !self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    /// Reports of files that changed, warned or failed, sorted by path.
    pub files: Vec<FileReport>,
    pub files_analyzed: usize,
    /// Whether rewritten files were written back.
    pub written: bool,
}

impl RunResult {
    pub fn changed_count(&self) -> usize {
        self.count(FileStatus::Changed)
    }

    pub fn failed_count(&self) -> usize {
        self.count(FileStatus::Failed)
    }

    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|f| f.warnings.len()).sum()
    }

    fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }
}
