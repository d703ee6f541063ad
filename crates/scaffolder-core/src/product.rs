//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface each scaffolder binary implements to
//! configure what gets cloned, how the manifest is rewritten and what is
//! cleaned up afterwards.

use crate::dependencies::PackageManager;
use crate::project::cleanup::DEFAULT_CLEANUP_TARGETS;
use crate::project::manifest::ManifestUpdate;

/// Configuration trait for different scaffolder products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Template source
/// - Manifest contents for new projects
/// - Template-only paths to remove
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used as the CLI command and a manifest keyword)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default template repository
    fn default_template_url(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Keywords written into every new manifest, ahead of the project name
    fn keywords(&self) -> &'static [&'static str];

    /// The `scripts` table of every new manifest
    fn scripts(&self) -> &'static [(&'static str, &'static str)];

    /// Manifest description for a new project
    fn project_description(&self, project_name: &str) -> String {
        format!("{} app description", project_name)
    }

    /// Template-only paths, removed in this order
    fn cleanup_targets(&self) -> &'static [&'static str] {
        DEFAULT_CLEANUP_TARGETS
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_name: &str, package_manager: PackageManager) -> Vec<String> {
        vec![
            format!("cd {}", project_name),
            package_manager.run_script("dev"),
        ]
    }

    /// Manifest update for a new project
    fn manifest_update(&self, project_name: &str) -> ManifestUpdate {
        ManifestUpdate::new(project_name, self.project_description(project_name))
            .with_keywords(self.keywords().iter().copied())
            .with_scripts(self.scripts().iter().copied())
    }
}
