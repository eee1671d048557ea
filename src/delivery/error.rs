//! Delivery error types

use std::path::PathBuf;
use thiserror::Error;

/// Faults raised while building, staging or delivering an artifact
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Artifact not found at {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("Source and staging path are the same file: {}", .0.display())]
    SameFile(PathBuf),

    #[error("`{command}` exited with code {code}: {stderr}")]
    ProcessFailure {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("{tool} is not installed. Install it with: {install_hint}")]
    ToolNotInstalled { tool: String, install_hint: String },

    #[error("{}", transport_message(.status, .detail))]
    TransportFailure { status: Option<u16>, detail: String },

    #[error("Could not launch `{command}`: {source}")]
    LaunchFailure {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Step `{0}` reported failure")]
    StepFailed(String),
}

impl DeliveryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeliveryError::Io {
            path: path.into(),
            source,
        }
    }
}

fn transport_message(status: &Option<u16>, detail: &str) -> String {
    match status {
        Some(status) => format!("Upload rejected with HTTP {}: {}", status, detail),
        None => format!("Upload failed: {}", detail),
    }
}
