//! Assembling the step list for a run

use crate::core::{config::DeployConfig, DeliveryFlavor, DeploymentTarget, Pipeline, Step};
use crate::delivery::{CloudTransport, UploadTransport};
use crate::execution::steps::{
    BuildAction, CloudDeployAction, StageAction, StartLocalDeliveryAction, UploadAction, BUILD,
    CLOUD_DEPLOY, STAGE, START_LOCAL_DELIVERY, UPLOAD,
};
use crate::process::{DetachedLauncher, ProcessRunner, SystemLauncher, SystemRunner};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// External collaborators the steps talk to
#[derive(Clone)]
pub struct Toolchain {
    pub runner: Arc<dyn ProcessRunner>,
    pub launcher: Arc<dyn DetachedLauncher>,
    pub uploader: Arc<UploadTransport>,
}

impl Toolchain {
    /// Real processes and a real HTTP client
    pub fn system(config: &DeployConfig) -> Result<Self> {
        let uploader = UploadTransport::new(Duration::from_secs(config.local.upload_timeout_secs))
            .context("Failed to create upload client")?;
        Ok(Self {
            runner: Arc::new(SystemRunner::new()),
            launcher: Arc::new(SystemLauncher::new()),
            uploader: Arc::new(uploader),
        })
    }
}

/// Name of the pipeline selected by target and flavor
pub fn pipeline_name(target: DeploymentTarget, flavor: DeliveryFlavor) -> &'static str {
    match (target, flavor) {
        (DeploymentTarget::Local, DeliveryFlavor::Server) => "local-server",
        (DeploymentTarget::Local, DeliveryFlavor::Upload) => "local-upload",
        (DeploymentTarget::Cloud, _) => "cloud",
    }
}

/// Build the pipeline for one run
///
/// Local/Server: Build, Stage, StartLocalDelivery
/// Local/Upload: Build, Stage, Upload
/// Cloud (any flavor): Build, Stage, CloudDeploy
pub fn plan_pipeline(
    config: &DeployConfig,
    project_dir: &Path,
    target: DeploymentTarget,
    flavor: DeliveryFlavor,
    toolchain: &Toolchain,
) -> Result<Pipeline> {
    let paths = config.artifact_paths(project_dir);

    let mut steps = vec![
        Step::new(
            BUILD,
            BuildAction {
                runner: toolchain.runner.clone(),
                command: config.build.command.clone(),
                project_dir: project_dir.to_path_buf(),
            },
        ),
        Step::new(
            STAGE,
            StageAction {
                paths: paths.clone(),
            },
        ),
    ];

    let delivery = match (target, flavor) {
        (DeploymentTarget::Local, DeliveryFlavor::Server) => Step::new(
            START_LOCAL_DELIVERY,
            StartLocalDeliveryAction {
                launcher: toolchain.launcher.clone(),
                command: config.local.server.clone(),
                project_dir: project_dir.to_path_buf(),
                endpoint: config.local.endpoint.clone(),
            },
        ),
        (DeploymentTarget::Local, DeliveryFlavor::Upload) => Step::new(
            UPLOAD,
            UploadAction {
                transport: toolchain.uploader.clone(),
                staging_path: paths.staging_path,
                endpoint: config.local.endpoint.clone(),
            },
        ),
        (DeploymentTarget::Cloud, _) => Step::new(
            CLOUD_DEPLOY,
            CloudDeployAction {
                transport: CloudTransport::new(toolchain.runner.clone(), config.cloud.clone()),
                project_dir: project_dir.to_path_buf(),
            },
        ),
    };
    steps.push(delivery);

    Pipeline::new(pipeline_name(target, flavor), target, steps)
}
