//! Fire-and-forget process launch

use crate::process::CommandSpec;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Starts a process without waiting for it
///
/// `launch` returns as soon as the OS has created the child. The child is not
/// tracked afterwards: nothing waits on it, monitors it, or stops it, and it
/// keeps running after the launcher's own process exits. An `Err` means the
/// process could not be started at all.
pub trait DetachedLauncher: Send + Sync {
    /// Returns the child's process id
    fn launch(&self, command: &CommandSpec, working_dir: &Path) -> io::Result<u32>;
}

/// Launches real child processes that inherit stdout/stderr
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl DetachedLauncher for SystemLauncher {
    fn launch(&self, command: &CommandSpec, working_dir: &Path) -> io::Result<u32> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .spawn()?;

        let pid = child.id();
        debug!("Launched detached `{}` (pid {})", command, pid);

        // Dropping a std Child neither waits on nor kills the process.
        drop(child);
        Ok(pid)
    }
}
