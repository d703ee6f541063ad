//! Required external tools (git, package managers)
//!
//! A tool counts as installed when its version probe can be executed and
//! exits cleanly.

use crate::error::EnvironmentError;
use crate::process::{self, Invocation, IoMode};

/// Configuration for a CLI tool the installer shells out to
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "git")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Arguments of a no-op probe command
    pub probe_args: &'static [&'static str],
    /// Where to get the tool
    pub install_url: &'static str,
}

/// Checks for a single required tool
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    fn probe(&self) -> Invocation {
        Invocation::new(self.config.name)
            .args(self.config.probe_args.iter().copied())
            .io(IoMode::Silent)
    }

    /// Check if the tool can be executed
    pub async fn is_installed(&self) -> bool {
        process::run(&self.probe()).await.is_ok()
    }

    /// Get the installed tool version (if available)
    pub async fn get_version(&self) -> Option<String> {
        process::capture_stdout(&self.probe()).await.ok()
    }

    /// Fail with an install hint unless the probe runs successfully
    pub async fn require(&self) -> Result<(), EnvironmentError> {
        if self.is_installed().await {
            return Ok(());
        }
        Err(EnvironmentError::ToolMissing {
            name: self.config.display_name.to_string(),
            hint: self.config.install_url.to_string(),
        })
    }
}

/// Pre-configured tool manager for git
pub fn git_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "git",
        display_name: "Git",
        probe_args: &["--version"],
        install_url: "https://git-scm.com/",
    })
}
