//! Artifact staging and the two delivery transports

pub mod artifact;
pub mod cloud;
pub mod error;
pub mod upload;

pub use artifact::{ArtifactLocator, ArtifactPaths};
pub use cloud::{CloudCli, CloudTransport};
pub use error::DeliveryError;
pub use upload::{UploadReceipt, UploadTransport, FIRMWARE_FIELD};
