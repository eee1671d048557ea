//! ota-deploy - build, stage and deliver firmware images

pub mod cli;
pub mod core;
pub mod delivery;
pub mod execution;
pub mod process;

// Re-export commonly used types
pub use crate::core::{DeliveryFlavor, DeploymentTarget, ExecutionStatus, Pipeline, RunReport, Step, StepAction};
pub use crate::delivery::{ArtifactLocator, ArtifactPaths, CloudTransport, DeliveryError, UploadTransport};
pub use crate::execution::{plan_pipeline, ExecutionEngine, ExecutionEvent, Toolchain};
pub use crate::process::{CommandResult, CommandSpec, DetachedLauncher, ProcessRunner};
