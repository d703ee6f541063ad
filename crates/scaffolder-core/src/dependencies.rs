//! Dependency installation through the project's package manager

use crate::error::ProcessError;
use crate::process::{self, Invocation, IoMode};
use crate::runtime::{RuntimeRequirement, ToolConfig, ToolManager};
use clap::ValueEnum;
use std::fmt;
use std::future::Future;
use std::path::Path;

/// Minimum Node.js major version for the Node-based package managers
pub const MIN_NODE_MAJOR: u64 = 20;

/// Backend that installs a project's dependencies in place
pub trait InstallDependencies {
    fn install_dependencies(&self, project_dir: &Path) -> impl Future<Output = Result<(), ProcessError>>;
}

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments of the quiet install command
    pub fn install_args(&self) -> &'static [&'static str] {
        match self {
            // Yarn 2+ rejects --silent
            PackageManager::Yarn => &["install"],
            _ => &["install", "--silent"],
        }
    }

    /// Command that starts the dev server in the generated project
    pub fn run_script(&self, script: &str) -> String {
        format!("{} run {}", self.command(), script)
    }

    /// Runtime the package manager itself needs
    pub fn runtime(&self) -> RuntimeRequirement {
        match self {
            PackageManager::Bun => RuntimeRequirement::bun(1),
            _ => RuntimeRequirement::node(MIN_NODE_MAJOR),
        }
    }

    /// Tool probe for preflight checks
    pub fn tool(&self) -> ToolManager {
        let install_url = match self {
            PackageManager::Npm => "https://docs.npmjs.com/downloading-and-installing-node-js-and-npm",
            PackageManager::Pnpm => "https://pnpm.io/installation",
            PackageManager::Yarn => "https://yarnpkg.com/getting-started/install",
            PackageManager::Bun => "https://bun.sh/",
        };
        ToolManager::new(ToolConfig {
            name: self.command(),
            display_name: self.command(),
            probe_args: &["--version"],
            install_url,
        })
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Runs `<package manager> install` inside the project directory
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageInstaller {
    pub manager: PackageManager,
    pub io: IoMode,
}

impl PackageInstaller {
    pub fn new(manager: PackageManager, io: IoMode) -> Self {
        Self { manager, io }
    }

    pub fn invocation(&self, project_dir: &Path) -> Invocation {
        Invocation::new(self.manager.command())
            .args(self.manager.install_args().iter().copied())
            .current_dir(project_dir)
            .io(self.io)
    }
}

impl InstallDependencies for PackageInstaller {
    async fn install_dependencies(&self, project_dir: &Path) -> Result<(), ProcessError> {
        process::run(&self.invocation(project_dir)).await
    }
}
