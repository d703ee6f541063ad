//! Operations on the generated project directory
//!
//! This module provides:
//! - Destination allocation (create, or reuse when empty)
//! - `package.json` rewriting
//! - Removal of template-only files

pub mod cleanup;
pub mod directory;
pub mod manifest;

pub use cleanup::{clean_boilerplate, CleanupReport, DEFAULT_CLEANUP_TARGETS};
pub use directory::{ensure_project_directory, inspect_directory, Allocation, DirectoryState};
pub use manifest::{
    rewrite_manifest, ManifestDocument, ManifestOutcome, ManifestUpdate, MANIFEST_FILE,
};
