//! Scaffolder Core - Shared library for project scaffolding CLIs
//!
//! This library materializes a new project from a template repository: it
//! clones the template, installs its dependencies, removes template-only
//! files and rewrites `package.json` for the new project. Each scaffolder
//! binary supplies its product values through [`ProductConfig`].
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Preflight checks, process runner, directory
//!   allocation, template clone, dependency install, cleanup, manifest rewrite
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the staged `Installer`
//! - **Layer 3: Terminal Output** - `Progress` reporters, with an optional
//!   cliclack spinner (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based spinner reporter
//!
//! # Example Usage
//!
//! ```ignore
//! use scaffolder_core::{Installer, InstallRequest, Preflight, GitCloner, PackageInstaller};
//!
//! let installer = Installer::new(
//!     MyConfig,
//!     GitCloner::default(),
//!     Some(PackageInstaller::default()),
//!     Preflight::for_install(PackageManager::Npm, false),
//! );
//! let request = InstallRequest::new("my-app", &cwd, template)?;
//! let summary = installer.run(&request, &mut PlainProgress).await?;
//! ```

pub mod dependencies;
pub mod driver;
pub mod error;
pub mod process;
pub mod product;
pub mod progress;
pub mod project;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use dependencies::{InstallDependencies, PackageInstaller, PackageManager};
pub use driver::{InstallRequest, InstallSummary, Installer, Preflight, Stage, StageError};
pub use error::{EnvironmentError, ManifestError, ProcessError, ScaffoldError};
pub use process::IoMode;
pub use product::ProductConfig;
pub use progress::{PlainProgress, Progress, RecordingProgress, SilentProgress};
pub use project::{Allocation, CleanupReport, DirectoryState, ManifestOutcome, ManifestUpdate};
pub use templates::{CloneTemplate, GitCloner, TemplateSource};
