//! Project manifest (`package.json`) rewriting
//!
//! The document is kept as an ordered JSON object so fields the template
//! author added survive the rewrite untouched and in their original position.

use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Manifest file name inside the project directory
pub const MANIFEST_FILE: &str = "package.json";

/// Version every freshly scaffolded project starts at
pub const INITIAL_VERSION: &str = "1.0.0";

/// Fields that only make sense for the template itself
pub const STRIPPED_FIELDS: &[&str] = &[
    "author",
    "bin",
    "files",
    "homepage",
    "repository",
    "bugs",
    "funding",
];

pub type ManifestDocument = Map<String, Value>;

/// Identity fields written into the new project's manifest
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestUpdate {
    pub name: String,
    pub version: String,
    pub description: String,
    /// Complete keyword list, project name included
    pub keywords: Vec<String>,
    /// Replaces the template's `scripts` table, in this order
    pub scripts: Vec<(String, String)>,
    pub stripped: Vec<String>,
}

impl ManifestUpdate {
    /// Update for `project_name` with the default version and stripped fields
    pub fn new(project_name: &str, description: String) -> Self {
        Self {
            name: project_name.to_string(),
            version: INITIAL_VERSION.to_string(),
            description,
            keywords: vec![project_name.to_string()],
            scripts: Vec::new(),
            stripped: STRIPPED_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Put descriptive keywords ahead of the project name
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all: Vec<String> = keywords.into_iter().map(Into::into).collect();
        if !all.contains(&self.name) {
            all.push(self.name.clone());
        }
        self.keywords = all;
        self
    }

    pub fn with_scripts<I, K, V>(mut self, scripts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.scripts = scripts
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Apply the update to a loaded document
    ///
    /// Existing keys keep their position, new keys are appended and stripped
    /// keys are removed without disturbing the order of the rest.
    pub fn apply(&self, mut doc: ManifestDocument) -> ManifestDocument {
        doc.insert("name".to_string(), Value::String(self.name.clone()));
        doc.insert("version".to_string(), Value::String(self.version.clone()));
        doc.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        doc.insert(
            "keywords".to_string(),
            Value::Array(self.keywords.iter().cloned().map(Value::String).collect()),
        );

        let scripts: Map<String, Value> = self
            .scripts
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        doc.insert("scripts".to_string(), Value::Object(scripts));

        for field in &self.stripped {
            doc.shift_remove(field);
        }

        doc
    }
}

/// Result of [`rewrite_manifest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestOutcome {
    Rewritten(PathBuf),
    /// No manifest in the project; nothing to do
    Missing,
}

/// Parse manifest text into an ordered object
pub fn parse_manifest(path: &Path, content: &str) -> Result<ManifestDocument, ManifestError> {
    let value: Value = serde_json::from_str(content).map_err(|e| ManifestError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(doc) => Ok(doc),
        other => Err(ManifestError::Parse {
            path: path.to_path_buf(),
            reason: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Render a document with two-space indentation and a trailing newline
pub fn render_manifest(doc: &ManifestDocument) -> String {
    let mut text = serde_json::to_string_pretty(doc).unwrap_or_else(|_| "{}".to_string());
    text.push('\n');
    text
}

/// Load, update and write back `package.json` in `project_dir`
///
/// Nothing is written when the file cannot be read or parsed.
pub async fn rewrite_manifest(
    project_dir: &Path,
    update: &ManifestUpdate,
) -> Result<ManifestOutcome, ManifestError> {
    let path = project_dir.join(MANIFEST_FILE);

    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ManifestOutcome::Missing),
        Err(source) => return Err(ManifestError::Read { path, source }),
    };

    let doc = parse_manifest(&path, &content)?;
    let updated = update.apply(doc);

    fs::write(&path, render_manifest(&updated))
        .await
        .map_err(|source| ManifestError::Write {
            path: path.clone(),
            source,
        })?;

    Ok(ManifestOutcome::Rewritten(path))
}
