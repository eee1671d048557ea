//! Step actions for the build, stage and delivery phases

use crate::core::StepAction;
use crate::delivery::{ArtifactLocator, ArtifactPaths, CloudTransport, DeliveryError, UploadTransport};
use crate::process::{CommandSpec, DetachedLauncher, ProcessRunner};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

pub const BUILD: &str = "Build";
pub const STAGE: &str = "Stage";
pub const START_LOCAL_DELIVERY: &str = "StartLocalDelivery";
pub const UPLOAD: &str = "Upload";
pub const CLOUD_DEPLOY: &str = "CloudDeploy";

/// Runs the build tool in the project directory
pub struct BuildAction {
    pub runner: Arc<dyn ProcessRunner>,
    pub command: CommandSpec,
    pub project_dir: PathBuf,
}

#[async_trait]
impl StepAction for BuildAction {
    async fn run(&self) -> Result<(), DeliveryError> {
        let result = self.runner.run(&self.command, &self.project_dir).await;

        if !result.succeeded() {
            return Err(DeliveryError::ProcessFailure {
                command: self.command.to_string(),
                code: result.exit_code,
                stderr: result.stderr,
            });
        }

        debug!("{}", result.stdout);
        info!("Build finished: `{}`", self.command);
        Ok(())
    }
}

/// Copies the build output to its staging location
pub struct StageAction {
    pub paths: ArtifactPaths,
}

#[async_trait]
impl StepAction for StageAction {
    async fn run(&self) -> Result<(), DeliveryError> {
        ArtifactLocator::try_stage(&self.paths).await.map(|_| ())
    }
}

/// Starts the delivery endpoint in the background
///
/// Succeeds once the process is launched; readiness is never awaited.
pub struct StartLocalDeliveryAction {
    pub launcher: Arc<dyn DetachedLauncher>,
    pub command: CommandSpec,
    pub project_dir: PathBuf,
    pub endpoint: String,
}

#[async_trait]
impl StepAction for StartLocalDeliveryAction {
    async fn run(&self) -> Result<(), DeliveryError> {
        let pid = self
            .launcher
            .launch(&self.command, &self.project_dir)
            .map_err(|source| DeliveryError::LaunchFailure {
                command: self.command.to_string(),
                source,
            })?;

        info!(
            "Delivery endpoint `{}` launched (pid {}), expected at {}",
            self.command, pid, self.endpoint
        );
        Ok(())
    }
}

/// Uploads the staged artifact to a running endpoint
pub struct UploadAction {
    pub transport: Arc<UploadTransport>,
    pub staging_path: PathBuf,
    pub endpoint: String,
}

#[async_trait]
impl StepAction for UploadAction {
    async fn run(&self) -> Result<(), DeliveryError> {
        let receipt = self
            .transport
            .try_upload(&self.staging_path, &self.endpoint)
            .await?;
        info!("Firmware uploaded: {}", receipt.body);
        Ok(())
    }
}

/// Deploys the project through the platform CLI
pub struct CloudDeployAction {
    pub transport: CloudTransport,
    pub project_dir: PathBuf,
}

#[async_trait]
impl StepAction for CloudDeployAction {
    async fn run(&self) -> Result<(), DeliveryError> {
        self.transport.try_deploy(&self.project_dir).await?;
        Ok(())
    }
}
