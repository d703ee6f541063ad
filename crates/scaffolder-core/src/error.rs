//! Error taxonomy for the scaffolding steps
//!
//! Every step returns one of these; the driver wraps the failing one in a
//! [`crate::driver::StageError`] so the user sees which step broke.

use std::path::PathBuf;
use thiserror::Error;

/// Host environment does not meet the installer's requirements
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("{runtime} v{required}+ required (found {found})")]
    RuntimeTooOld {
        runtime: String,
        required: u64,
        found: String,
    },

    #[error("Could not read {runtime} version from '{found}'")]
    UnreadableVersion { runtime: String, found: String },

    #[error("{name} is not installed. See {hint}")]
    ToolMissing { name: String, hint: String },
}

/// Failure of an external command
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed with {}{}", describe_exit(.code), describe_stderr(.stderr))]
    Exit {
        command: String,
        code: Option<i32>,
        stderr: Option<String>,
    },
}

impl ProcessError {
    /// Exit code of the failed command, if it exited normally
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProcessError::Exit { code, .. } => *code,
            ProcessError::Spawn { .. } => None,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "termination by signal".to_string(),
    }
}

fn describe_stderr(stderr: &Option<String>) -> String {
    match stderr.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => format!(":\n{}", text),
        _ => String::new(),
    }
}

/// Failure loading or storing the project manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error("Directory \"{}\" exists and is not empty.", .0.display())]
    DirectoryNotEmpty(PathBuf),

    #[error("\"{}\" exists and is not a directory.", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Failed to remove {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// True for errors raised because the destination cannot be used
    pub fn is_filesystem_conflict(&self) -> bool {
        matches!(
            self,
            ScaffoldError::DirectoryNotEmpty(_) | ScaffoldError::NotADirectory(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_error_names_command_and_code() {
        let err = ProcessError::Exit {
            command: "git clone".to_string(),
            code: Some(128),
            stderr: None,
        };
        assert_eq!(err.to_string(), "git clone failed with exit code 128");
        assert_eq!(err.exit_code(), Some(128));
    }

    #[test]
    fn test_exit_error_appends_stderr() {
        let err = ProcessError::Exit {
            command: "npm install".to_string(),
            code: Some(1),
            stderr: Some("npm ERR! missing script\n".to_string()),
        };
        assert!(err.to_string().ends_with(":\nnpm ERR! missing script"));
    }

    #[test]
    fn test_blank_stderr_is_not_appended() {
        let err = ProcessError::Exit {
            command: "npm install".to_string(),
            code: None,
            stderr: Some("  \n".to_string()),
        };
        assert_eq!(err.to_string(), "npm install failed with termination by signal");
    }

    #[test]
    fn test_conflict_message() {
        let err = ScaffoldError::DirectoryNotEmpty(PathBuf::from("/tmp/my-app"));
        assert_eq!(
            err.to_string(),
            "Directory \"/tmp/my-app\" exists and is not empty."
        );
        assert!(err.is_filesystem_conflict());
    }
}
