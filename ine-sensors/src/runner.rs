//! External command execution
//!
//! [`CommandRunner`] is the seam between collection and the operating system.
//! [`SystemRunner`] spawns real child processes with tokio; tests substitute
//! canned output.

use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use ine_error::ExporterError;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::Result;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Wrap this command in another program, e.g. `sudo`
    pub fn wrapped_in(self, wrapper: impl Into<String>) -> Self {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: wrapper.into(),
            args,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs an external command to completion and returns its stdout
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &CommandSpec) -> Result<String>;
}

/// Runs commands as child processes, optionally bounded by a timeout
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<String> {
        debug!("Executing {}", command);

        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        // Dropping the future on timeout kills the child
        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child)
                .await
                .map_err(|_| ExporterError::Timeout {
                    command: command.to_string(),
                    timeout: limit,
                })?,
            None => child.await,
        }
        .map_err(|e| ExporterError::CommandSpawn {
            command: command.to_string(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(ExporterError::CommandFailed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        trace!("{} output:\n{}", command, stdout);
        Ok(stdout)
    }
}
