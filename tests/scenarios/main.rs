//! Scenario-based tests for ota-deploy


mod cloud_deploy;
mod local_delivery;
mod missing_artifact;
mod upload_flow;
