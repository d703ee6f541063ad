//! Removal of template-only files from a freshly cloned project

use crate::error::{Result, ScaffoldError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Paths removed by default, relative to the project root
pub const DEFAULT_CLEANUP_TARGETS: &[&str] = &[".git", ".github", "bin", "renovate.json"];

/// What a cleanup pass removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Targets that existed and were removed, in visiting order
    pub removed: Vec<PathBuf>,
    /// Number of files inside the removed targets
    pub files: usize,
}

impl CleanupReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

fn count_files(path: &Path) -> usize {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .count()
}

/// Remove each target under `project_dir`, in order
///
/// Missing targets are skipped. A target that exists but cannot be fully
/// removed stops the pass with an error naming it.
pub async fn clean_boilerplate<S: AsRef<str>>(
    project_dir: &Path,
    targets: &[S],
) -> Result<CleanupReport> {
    let mut report = CleanupReport::default();

    for target in targets {
        let path = project_dir.join(target.as_ref());

        // Don't follow symlinks: a linked directory is removed as a link
        let metadata = match fs::symlink_metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(source) => return Err(ScaffoldError::Cleanup { path, source }),
        };

        let files = if metadata.is_dir() { count_files(&path) } else { 1 };

        let removal = if metadata.is_dir() {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_file(&path).await
        };
        if let Err(source) = removal {
            return Err(ScaffoldError::Cleanup { path, source });
        }

        report.files += files;
        report.removed.push(path);
    }

    Ok(report)
}
