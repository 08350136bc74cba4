//! External tool execution.
//!
//! Every process the converter starts goes through [`ToolRunner`]. Commands
//! are built as a program plus an argument array and are never passed
//! through a shell, so paths containing shell metacharacters are inert.

use std::ffi::OsString;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// Errors from starting or waiting on an external process.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The process could not be started (missing binary, permissions).
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        /// The program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process did not finish within the configured timeout.
    #[error("'{program}' timed out after {seconds} seconds")]
    Timeout {
        /// The program that was killed.
        program: String,
        /// The timeout that was exceeded.
        seconds: u64,
    },
}

/// One external command: program, argument array, optional timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Executable name or path.
    pub program: OsString,
    /// Arguments, passed verbatim.
    pub args: Vec<OsString>,
    /// Kill the process if it runs longer than this.
    pub timeout: Option<Duration>,
}

impl ToolInvocation {
    /// Start building an invocation of `program`.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Human-readable command line for logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Wall-clock duration.
    pub duration_ms: u64,
}

/// Runs external commands and captures their exit status and output.
#[async_trait]
pub trait ToolRunner: Send + Sync + std::fmt::Debug + 'static {
    /// Run the invocation to completion.
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ExecutorError>;
}

/// [`ToolRunner`] backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct SystemToolRunner;

impl SystemToolRunner {
    /// Create a runner that inherits the current working directory.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolRunner for SystemToolRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ExecutorError> {
        let start = Instant::now();
        let program = invocation.program.to_string_lossy().to_string();

        tracing::debug!(command = %invocation.display(), "Executing external tool");

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match invocation.timeout {
            Some(limit) => match tokio::time::timeout(limit, cmd.output()).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::error!(
                        "Tool timed out after {}s: command='{}'",
                        limit.as_secs(),
                        invocation.display()
                    );
                    return Err(ExecutorError::Timeout {
                        program,
                        seconds: limit.as_secs(),
                    });
                }
            },
            None => cmd.output().await,
        }
        .map_err(|source| ExecutorError::Spawn {
            program: program.clone(),
            source,
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            command = %invocation.display(),
            exit_code = ?output.status.code(),
            duration_ms,
            "External tool finished"
        );

        Ok(ToolOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            duration_ms,
        })
    }
}

/// Keep at most `limit` characters of tool output for error messages.
pub fn truncate_output(output: &str, limit: usize) -> String {
    output.trim().chars().take(limit).collect()
}
