//! Destination directory allocation
//!
//! The check-then-create is not atomic; two concurrent runs against the same
//! path are not coordinated.

use crate::error::{Result, ScaffoldError};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// What currently occupies the destination path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    Absent,
    Empty,
    NonEmpty,
}

/// How the destination was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    Created,
    Reused,
}

/// Inspect the destination without changing it
///
/// A path occupied by anything other than a directory is a conflict.
pub async fn inspect_directory(path: &Path) -> Result<DirectoryState> {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(DirectoryState::Absent),
        Err(source) => {
            return Err(ScaffoldError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if !metadata.is_dir() {
        return Err(ScaffoldError::NotADirectory(path.to_path_buf()));
    }

    let mut entries = fs::read_dir(path).await.map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let first = entries.next_entry().await.map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(match first {
        Some(_) => DirectoryState::NonEmpty,
        None => DirectoryState::Empty,
    })
}

/// Create the destination (with any missing parents) or reuse it if empty
///
/// Refuses to touch a directory that already has contents.
pub async fn ensure_project_directory(path: &Path) -> Result<Allocation> {
    match inspect_directory(path).await? {
        DirectoryState::Absent => {
            fs::create_dir_all(path)
                .await
                .map_err(|source| ScaffoldError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
            Ok(Allocation::Created)
        }
        DirectoryState::Empty => Ok(Allocation::Reused),
        DirectoryState::NonEmpty => Err(ScaffoldError::DirectoryNotEmpty(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("my-app");

        assert_eq!(inspect_directory(&target).await.unwrap(), DirectoryState::Absent);
        let allocation = ensure_project_directory(&target).await.unwrap();

        assert_eq!(allocation, Allocation::Created);
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_creates_missing_parents() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("a").join("b").join("my-app");

        ensure_project_directory(&target).await.unwrap();
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_reuses_empty_directory() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("my-app");
        std::fs::create_dir(&target).unwrap();

        assert_eq!(inspect_directory(&target).await.unwrap(), DirectoryState::Empty);
        let allocation = ensure_project_directory(&target).await.unwrap();

        assert_eq!(allocation, Allocation::Reused);
        assert_eq!(std::fs::read_dir(&target).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_second_run_on_empty_directory_passes() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("my-app");

        ensure_project_directory(&target).await.unwrap();
        assert_eq!(
            ensure_project_directory(&target).await.unwrap(),
            Allocation::Reused
        );
    }

    #[tokio::test]
    async fn test_rejects_non_empty_directory() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("my-app");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("x"), "x").unwrap();

        let err = ensure_project_directory(&target).await.unwrap_err();

        assert!(matches!(err, ScaffoldError::DirectoryNotEmpty(ref p) if p == &target));
        assert!(err.to_string().contains("exists and is not empty"));
        assert!(err.to_string().contains(&target.display().to_string()));
        // Untouched
        assert_eq!(std::fs::read_to_string(target.join("x")).unwrap(), "x");
    }

    #[tokio::test]
    async fn test_hidden_entry_counts_as_content() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("my-app");
        std::fs::create_dir_all(target.join(".git")).unwrap();

        assert_eq!(
            inspect_directory(&target).await.unwrap(),
            DirectoryState::NonEmpty
        );
    }

    #[tokio::test]
    async fn test_rejects_existing_file() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("my-app");
        std::fs::write(&target, "not a directory").unwrap();

        let err = ensure_project_directory(&target).await.unwrap_err();

        assert!(matches!(err, ScaffoldError::NotADirectory(_)));
        assert!(err.is_filesystem_conflict());
    }
}
