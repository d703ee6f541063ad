//! Template sources and fetching
//!
//! This module provides:
//! - Template locators (remote URL or local repository)
//! - The `CloneTemplate` backend interface and its git implementation

pub mod fetcher;

pub use fetcher::{CloneTemplate, GitCloner, TemplateSource};
