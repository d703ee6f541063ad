//! Preflight checks
//!
//! This module provides:
//! - Runtime version checks (Node.js, Bun)
//! - Required tool probes (git, package managers)

pub mod check;
pub mod tool;

pub use check::{check_runtime, check_runtime_version, parse_version, RuntimeInfo, RuntimeRequirement};
pub use tool::{git_tool, ToolConfig, ToolManager};
