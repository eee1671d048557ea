//! Subprocess runner backed by tokio

use crate::process::{CommandResult, CommandSpec, ProcessRunner};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs commands as real child processes and waits for them to exit
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec, working_dir: &Path) -> CommandResult {
        debug!("Running `{}` in {}", command, working_dir.display());

        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(working_dir)
            .kill_on_drop(true)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                warn!("Failed to launch `{}`: {}", command, e);
                return CommandResult::launch_failed(format!(
                    "Failed to launch `{}`: {}",
                    command, e
                ));
            }
        };

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        debug!(
            "`{}` exited with code {} ({} bytes stdout, {} bytes stderr)",
            command,
            exit_code,
            stdout.len(),
            stderr.len()
        );

        CommandResult::completed(exit_code, stdout, stderr)
    }
}
