//! Install workflow orchestration
//!
//! Stages run strictly in order, each at most once:
//! preflight, directory, fetch, install, cleanup, manifest. The first failure
//! stops the run; nothing is rolled back.

use crate::dependencies::{InstallDependencies, PackageManager};
use crate::error::{EnvironmentError, Result, ScaffoldError};
use crate::product::ProductConfig;
use crate::progress::Progress;
use crate::project::{
    clean_boilerplate, ensure_project_directory, rewrite_manifest, Allocation, CleanupReport,
    ManifestOutcome,
};
use crate::runtime::{check_runtime, git_tool, RuntimeInfo, RuntimeRequirement, ToolManager};
use crate::templates::{CloneTemplate, TemplateSource};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One scaffolding request, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    project_name: String,
    destination: PathBuf,
    template: TemplateSource,
}

impl InstallRequest {
    /// Build a request for `project_name`, placed under `base_dir`
    pub fn new(project_name: &str, base_dir: &Path, template: TemplateSource) -> Result<Self> {
        if project_name.trim().is_empty() {
            return Err(ScaffoldError::InvalidRequest(
                "project name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            project_name: project_name.to_string(),
            destination: base_dir.join(project_name),
            template,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn template(&self) -> &TemplateSource {
        &self.template
    }
}

/// Install stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Preflight,
    Directory,
    Fetch,
    Install,
    Cleanup,
    Manifest,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Preflight,
        Stage::Directory,
        Stage::Fetch,
        Stage::Install,
        Stage::Cleanup,
        Stage::Manifest,
    ];

    /// Progress text shown while the stage runs
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Preflight => "Checking environment",
            Stage::Directory => "Creating project",
            Stage::Fetch => "Cloning template",
            Stage::Install => "Installing packages",
            Stage::Cleanup => "Cleaning up",
            Stage::Manifest => "Updating package.json",
        }
    }

    /// Name used in failure messages
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Preflight => "Preflight check",
            Stage::Directory => "Directory allocation",
            Stage::Fetch => "Template clone",
            Stage::Install => "Dependency install",
            Stage::Cleanup => "Cleanup",
            Stage::Manifest => "Manifest rewrite",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed run: which stage broke, and why
#[derive(Error, Debug)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: ScaffoldError,
}

/// Environment requirements checked before anything touches the disk
#[derive(Default)]
pub struct Preflight {
    runtime: Option<RuntimeRequirement>,
    tools: Vec<ToolManager>,
}

impl Preflight {
    /// No checks at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Git plus, unless installation is skipped, the package manager and its runtime
    pub fn for_install(package_manager: PackageManager, skip_install: bool) -> Self {
        let mut preflight = Self::none().require_tool(git_tool());
        if !skip_install {
            preflight = preflight
                .require_runtime(package_manager.runtime())
                .require_tool(package_manager.tool());
        }
        preflight
    }

    pub fn require_runtime(mut self, runtime: RuntimeRequirement) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn require_tool(mut self, tool: ToolManager) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.runtime.is_none() && self.tools.is_empty()
    }

    /// Runtime version first, then each tool probe
    pub async fn check(&self) -> std::result::Result<Option<RuntimeInfo>, EnvironmentError> {
        let runtime = match &self.runtime {
            Some(requirement) => Some(check_runtime(requirement).await?),
            None => None,
        };

        for tool in &self.tools {
            tool.require().await?;
        }

        Ok(runtime)
    }
}

/// What a successful run did
#[derive(Debug, Clone)]
pub struct InstallSummary {
    pub destination: PathBuf,
    pub allocation: Allocation,
    pub runtime: Option<RuntimeInfo>,
    pub installed: bool,
    pub cleanup: CleanupReport,
    pub manifest: ManifestOutcome,
}

fn fail<P: Progress>(progress: &mut P, stage: Stage, error: impl Into<ScaffoldError>) -> StageError {
    progress.fail(stage);
    StageError {
        stage,
        source: error.into(),
    }
}

/// Sequences the install stages for one product
pub struct Installer<C, F, D> {
    config: C,
    fetcher: F,
    dependencies: Option<D>,
    preflight: Preflight,
}

impl<C, F, D> Installer<C, F, D>
where
    C: ProductConfig,
    F: CloneTemplate,
    D: InstallDependencies,
{
    pub fn new(config: C, fetcher: F, dependencies: Option<D>, preflight: Preflight) -> Self {
        Self {
            config,
            fetcher,
            dependencies,
            preflight,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Run every stage for `request`
    pub async fn run<P: Progress>(
        &self,
        request: &InstallRequest,
        progress: &mut P,
    ) -> std::result::Result<InstallSummary, StageError> {
        let destination = request.destination();

        // Preflight
        let runtime = if self.preflight.is_empty() {
            progress.skip(Stage::Preflight, "disabled");
            None
        } else {
            progress.start(Stage::Preflight);
            let runtime = self
                .preflight
                .check()
                .await
                .map_err(|e| fail(progress, Stage::Preflight, e))?;
            let detail = runtime
                .as_ref()
                .map(|r| format!("{} {}", r.name, r.version));
            progress.finish(Stage::Preflight, detail);
            runtime
        };

        // Directory
        progress.start(Stage::Directory);
        let allocation = ensure_project_directory(destination)
            .await
            .map_err(|e| fail(progress, Stage::Directory, e))?;
        progress.finish(Stage::Directory, Some(destination.display().to_string()));

        // Fetch
        progress.start(Stage::Fetch);
        self.fetcher
            .clone_template(request.template(), destination)
            .await
            .map_err(|e| fail(progress, Stage::Fetch, e))?;
        progress.finish(Stage::Fetch, Some(request.template().to_string()));

        // Install
        let installed = match &self.dependencies {
            Some(dependencies) => {
                progress.start(Stage::Install);
                dependencies
                    .install_dependencies(destination)
                    .await
                    .map_err(|e| fail(progress, Stage::Install, e))?;
                progress.finish(Stage::Install, None);
                true
            }
            None => {
                progress.skip(Stage::Install, "disabled");
                false
            }
        };

        // Cleanup
        progress.start(Stage::Cleanup);
        let cleanup = clean_boilerplate(destination, self.config.cleanup_targets())
            .await
            .map_err(|e| fail(progress, Stage::Cleanup, e))?;
        let detail = if cleanup.is_empty() {
            "nothing to remove".to_string()
        } else {
            format!(
                "removed {} path(s), {} file(s)",
                cleanup.removed.len(),
                cleanup.files
            )
        };
        progress.finish(Stage::Cleanup, Some(detail));

        // Manifest
        progress.start(Stage::Manifest);
        let update = self.config.manifest_update(request.project_name());
        let manifest = rewrite_manifest(destination, &update)
            .await
            .map_err(|e| fail(progress, Stage::Manifest, e))?;
        match &manifest {
            ManifestOutcome::Rewritten(_) => progress.finish(
                Stage::Manifest,
                Some(format!("{}@{}", update.name, update.version)),
            ),
            ManifestOutcome::Missing => progress.finish(Stage::Manifest, Some("no package.json".to_string())),
        }

        Ok(InstallSummary {
            destination: destination.to_path_buf(),
            allocation,
            runtime,
            installed,
            cleanup,
            manifest,
        })
    }
}
