//! Template fetching by shallow clone
//!
//! The fetcher does not validate the destination; the caller allocates it
//! first (absent-then-created, or empty).

use crate::error::ProcessError;
use crate::process::{self, Invocation, IoMode};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use url::Url;

/// Template source - either a remote URL or a local repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Interpret a user-supplied locator
    ///
    /// Anything with a URL scheme is remote; everything else is a path,
    /// resolved against `base_dir` when relative.
    pub fn parse(locator: &str, base_dir: &Path) -> Self {
        if let Ok(url) = Url::parse(locator) {
            // Single-letter schemes are Windows drive letters (C:\...)
            if url.scheme().len() > 1 {
                return Self::Remote(url);
            }
        }

        let path = PathBuf::from(locator);
        if path.is_absolute() {
            Self::Local(path)
        } else {
            Self::Local(base_dir.join(path))
        }
    }

    /// The argument handed to `git clone`
    ///
    /// Local paths go through `file://` so that `--depth` is honored.
    pub fn clone_url(&self) -> String {
        match self {
            Self::Remote(url) => url.to_string(),
            Self::Local(path) => Url::from_file_path(path)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| path.display().to_string()),
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{}", url),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Backend that materializes a template into a directory
pub trait CloneTemplate {
    fn clone_template(
        &self,
        source: &TemplateSource,
        destination: &Path,
    ) -> impl Future<Output = Result<(), ProcessError>>;
}

/// Shallow `git clone --depth 1`
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCloner {
    pub io: IoMode,
}

impl GitCloner {
    pub fn new(io: IoMode) -> Self {
        Self { io }
    }

    pub fn invocation(&self, source: &TemplateSource, destination: &Path) -> Invocation {
        let mut invocation = Invocation::new("git")
            .args(["clone", "--depth", "1"])
            .arg(source.clone_url())
            .arg(destination.display().to_string())
            .io(self.io);
        // Clone into the destination from its parent, so the command never
        // depends on the caller's working directory
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            invocation = invocation.current_dir(parent);
        }
        invocation
    }
}

impl CloneTemplate for GitCloner {
    async fn clone_template(
        &self,
        source: &TemplateSource,
        destination: &Path,
    ) -> Result<(), ProcessError> {
        process::run(&self.invocation(source, destination)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_url() {
        let source = TemplateSource::parse("https://github.com/SamNewhouse/create-nttb", Path::new("/work"));
        assert!(matches!(source, TemplateSource::Remote(_)));
        assert_eq!(source.clone_url(), "https://github.com/SamNewhouse/create-nttb");
    }

    #[test]
    fn test_parse_ssh_url() {
        let source = TemplateSource::parse("ssh://git@github.com/org/repo.git", Path::new("/work"));
        assert!(matches!(source, TemplateSource::Remote(_)));
    }

    #[test]
    fn test_parse_relative_path() {
        let source = TemplateSource::parse("../templates/nttb", Path::new("/work/projects"));
        assert_eq!(
            source,
            TemplateSource::Local(PathBuf::from("/work/projects/../templates/nttb"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_local_clone_url_uses_file_scheme() {
        let source = TemplateSource::Local(PathBuf::from("/srv/templates/nttb"));
        assert_eq!(source.clone_url(), "file:///srv/templates/nttb");
        assert_eq!(source.to_string(), "/srv/templates/nttb");
    }

    #[test]
    fn test_git_invocation_is_shallow() {
        let source = TemplateSource::parse("https://example.com/t.git", Path::new("/"));
        let inv = GitCloner::default().invocation(&source, Path::new("/work/my-app"));

        assert_eq!(inv.program, "git");
        assert_eq!(
            inv.args,
            ["clone", "--depth", "1", "https://example.com/t.git", "/work/my-app"]
        );
        assert_eq!(inv.working_dir.as_deref(), Some(Path::new("/work")));
        assert_eq!(inv.io, IoMode::Captured);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_clone_failure_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = TemplateSource::Local(tmp.path().join("no-such-repo"));
        let dest = tmp.path().join("my-app");

        // Fails either because git is absent (spawn) or the repo is (exit)
        let result = GitCloner::default().clone_template(&missing, &dest).await;
        assert!(result.is_err());
    }
}
