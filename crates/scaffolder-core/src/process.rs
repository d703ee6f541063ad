//! Uniform wrapper for running external commands
//!
//! Clone, install and tool probes all go through [`run`], so a failure is
//! reported the same way no matter which external tool broke.

use crate::error::ProcessError;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;

/// How the child's standard streams are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IoMode {
    /// Child writes straight to our terminal
    Inherit,
    /// Stdout is discarded, stderr is captured for the error message
    #[default]
    Captured,
    /// Everything is discarded
    Silent,
}

/// A single external command to run
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub io: IoMode,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            io: IoMode::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    pub fn io(mut self, io: IoMode) -> Self {
        self.io = io;
        self
    }

    /// Human-readable label used in error messages (program + first argument)
    pub fn label(&self) -> String {
        match self.args.first() {
            Some(sub) if !sub.starts_with('-') => format!("{} {}", self.program, sub),
            _ => self.program.clone(),
        }
    }
}

/// Spawn and wait, keeping whatever stdio the command was configured with
async fn wait(command: &mut Command, invocation: &Invocation) -> Result<Output, ProcessError> {
    let spawn_error = |source| ProcessError::Spawn {
        command: invocation.label(),
        source,
    };
    let child = command.spawn().map_err(spawn_error)?;
    child.wait_with_output().await.map_err(spawn_error)
}

/// Run the command to completion and classify the outcome
///
/// Launch failures carry the OS error; a non-zero exit carries the exit code
/// and, in [`IoMode::Captured`], whatever the child wrote to stderr.
pub async fn run(invocation: &Invocation) -> Result<(), ProcessError> {
    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args).stdin(Stdio::null());

    if let Some(dir) = &invocation.working_dir {
        command.current_dir(dir);
    }

    match invocation.io {
        IoMode::Inherit => {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        IoMode::Captured => {
            command.stdout(Stdio::null()).stderr(Stdio::piped());
        }
        IoMode::Silent => {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }
    }

    let output = wait(&mut command, invocation).await?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = match invocation.io {
        IoMode::Captured => Some(String::from_utf8_lossy(&output.stderr).into_owned()),
        _ => None,
    };

    Err(ProcessError::Exit {
        command: invocation.label(),
        code: output.status.code(),
        stderr,
    })
}

/// Run the command and return its trimmed stdout, for version probes
pub async fn capture_stdout(invocation: &Invocation) -> Result<String, ProcessError> {
    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = &invocation.working_dir {
        command.current_dir(dir);
    }

    let output = wait(&mut command, invocation).await?;

    if !output.status.success() {
        return Err(ProcessError::Exit {
            command: invocation.label(),
            code: output.status.code(),
            stderr: Some(String::from_utf8_lossy(&output.stderr).into_owned()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
