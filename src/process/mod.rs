//! External process invocation
//!
//! Every external tool (build tool, cloud CLI, delivery endpoint) is started
//! through one of the two seams defined here, so tests can substitute fakes
//! instead of spawning real processes.

pub mod detached;
pub mod runner;

pub use detached::{DetachedLauncher, SystemLauncher};
pub use runner::SystemRunner;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable name or path
    pub program: String,

    /// Arguments passed verbatim (no shell involved)
    #[serde(default)]
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

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
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

/// Outcome of a single external process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code (-1 when the process never started or was killed by a signal)
    pub exit_code: i32,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error, or the launch diagnostic
    pub stderr: String,

    /// False when the process could not be started at all
    pub launched: bool,
}

impl CommandResult {
    /// A process that ran to completion
    pub fn completed(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            launched: true,
        }
    }

    /// A process that could not be started
    pub fn launch_failed(diagnostic: impl Into<String>) -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr: diagnostic.into(),
            launched: false,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.launched && self.exit_code == 0
    }
}

/// Runs an external command to completion and captures its output
///
/// Implementations never fail: a process that cannot be started is reported
/// as a `CommandResult` with `launched == false`.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: &CommandSpec, working_dir: &Path) -> CommandResult;
}
