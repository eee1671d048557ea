//! Deployment targets and pipeline flavors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the staged firmware is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentTarget {
    /// Local OTA endpoint
    Local,
    /// External deployment platform
    Cloud,
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentTarget::Local => write!(f, "local"),
            DeploymentTarget::Cloud => write!(f, "cloud"),
        }
    }
}

/// How the local target receives the artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryFlavor {
    /// Launch the delivery endpoint in the background and stop there
    #[default]
    Server,
    /// Upload the staged artifact to an already running endpoint
    Upload,
}

impl fmt::Display for DeliveryFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryFlavor::Server => write!(f, "server"),
            DeliveryFlavor::Upload => write!(f, "upload"),
        }
    }
}
