//! External process invocation.
//!
//! Programs are always started with an argument array, never through a shell,
//! so paths with spaces or quotes cannot change what gets executed.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Failed to execute {program}: {source}")]
    Launch { program: String, source: io::Error },
}

/// Paths of the macOS utilities we drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub osascript: PathBuf,
    pub screencapture: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            osascript: PathBuf::from("osascript"),
            screencapture: PathBuf::from("screencapture"),
        }
    }
}

/// A single program invocation: executable, arguments, extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub envs: Vec<(OsString, OsString)>,
}

impl CommandSpec {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Looks up an environment variable set on this invocation.
    pub fn env_value(&self, key: &str) -> Option<&OsString> {
        self.envs
            .iter()
            .find(|(k, _)| k.as_os_str() == key)
            .map(|(_, v)| v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs external programs. Swapped for a fake in tests.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError>;
}

/// Runs programs with `tokio::process`, waiting for them to exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        debug!(
            program = %spec.program.display(),
            args = spec.args.len(),
            "Running external command"
        );

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .envs(spec.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| CommandError::Launch {
                program: spec.program.display().to_string(),
                source,
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(program = %spec.program.display(), code = ?result.status, "External command finished");
        Ok(result)
    }
}
