//! CLI command definitions

use crate::core::{DeliveryFlavor, DeploymentTarget};
use clap::Args;

/// Build, stage and deliver the firmware
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Deploy through the cloud platform CLI instead of the local endpoint
    #[arg(short, long)]
    pub cloud: bool,

    /// Upload to an already running endpoint instead of launching one
    #[arg(long, conflicts_with = "cloud")]
    pub upload: bool,

    /// Override the local endpoint base URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunCommand {
    pub fn target(&self) -> DeploymentTarget {
        if self.cloud {
            DeploymentTarget::Cloud
        } else {
            DeploymentTarget::Local
        }
    }

    pub fn flavor(&self) -> DeliveryFlavor {
        if self.upload {
            DeliveryFlavor::Upload
        } else {
            DeliveryFlavor::Server
        }
    }
}

/// Validate the deployment configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
