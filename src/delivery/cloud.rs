//! Deployment through an external platform CLI

use crate::delivery::DeliveryError;
use crate::process::{CommandResult, CommandSpec, ProcessRunner};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

/// How to invoke the platform CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudCli {
    /// Executable name
    pub program: String,

    /// Arguments for the capability probe
    pub probe_args: Vec<String>,

    /// Arguments for the deploy subcommand
    pub deploy_args: Vec<String>,

    /// Shown to the user when the CLI cannot be found
    pub install_hint: String,
}

impl Default for CloudCli {
    fn default() -> Self {
        Self {
            program: "railway".to_string(),
            probe_args: vec!["--version".to_string()],
            deploy_args: vec!["up".to_string()],
            install_hint: "npm install -g @railway/cli".to_string(),
        }
    }
}

impl CloudCli {
    pub fn probe_command(&self) -> CommandSpec {
        CommandSpec::new(&self.program).args(&self.probe_args)
    }

    pub fn deploy_command(&self) -> CommandSpec {
        CommandSpec::new(&self.program).args(&self.deploy_args)
    }
}

/// Probes for the platform CLI, then runs its deploy subcommand
#[derive(Clone)]
pub struct CloudTransport {
    runner: Arc<dyn ProcessRunner>,
    cli: CloudCli,
}

impl CloudTransport {
    pub fn new(runner: Arc<dyn ProcessRunner>, cli: CloudCli) -> Self {
        Self { runner, cli }
    }

    /// Deploy the project, logging the outcome
    ///
    /// A missing CLI and a failed deploy are logged differently but both
    /// yield false.
    pub async fn deploy(&self, project_dir: &Path) -> bool {
        match self.try_deploy(project_dir).await {
            Ok(_) => true,
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    /// Probe then deploy
    ///
    /// Any probe failure (the CLI cannot start, or rejects the probe) is
    /// `ToolNotInstalled` and the deploy subcommand is never invoked. A
    /// nonzero deploy exit is `ProcessFailure`. Success is logged here.
    pub async fn try_deploy(&self, project_dir: &Path) -> Result<CommandResult, DeliveryError> {
        let probe = self.cli.probe_command();
        let probe_result = self.runner.run(&probe, project_dir).await;

        if !probe_result.succeeded() {
            debug!("`{}` probe failed: {}", probe, probe_result.stderr.trim());
            return Err(DeliveryError::ToolNotInstalled {
                tool: self.cli.program.clone(),
                install_hint: self.cli.install_hint.clone(),
            });
        }
        debug!("{} {}", self.cli.program, probe_result.stdout.trim());

        let deploy = self.cli.deploy_command();
        let result = self.runner.run(&deploy, project_dir).await;

        if !result.succeeded() {
            return Err(DeliveryError::ProcessFailure {
                command: deploy.to_string(),
                code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }

        if !result.stdout.trim().is_empty() {
            debug!("{}", result.stdout.trim());
        }
        info!("Deployed with {}", self.cli.program);
        Ok(result)
    }
}
